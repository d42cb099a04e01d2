//! `party_members.json`: recruitable companions.

use std::path::PathBuf;
use std::sync::Arc;

use game_defs::{ArmourSlot, PartyMemberDef};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::tables::armour::ArmourRepository;
use crate::tables::loadout::{armour_slots, check_weapons, starting_attributes};
use crate::tables::weapons::WeaponsRepository;

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("base_stats", FieldKind::Object),
    Field::required("equipment", FieldKind::Object),
    Field::optional("tags", FieldKind::StrList),
    Field::optional("starting_level", FieldKind::PositiveInt),
    Field::optional("starting_attributes", FieldKind::Object),
];

const BASE_STATS_FIELDS: &[Field] = &[
    Field::required("max_hp", FieldKind::NonNegativeInt),
    Field::required("max_mp", FieldKind::NonNegativeInt),
    Field::required("speed", FieldKind::NonNegativeInt),
];

const EQUIPMENT_FIELDS: &[Field] = &[
    Field::optional("weapons", FieldKind::StrList),
    Field::optional("armour", FieldKind::Any),
];

const SCHEMA: Schema = Schema::new("party member", FIELDS);
const BASE_STATS: Schema = Schema::new("party member base_stats", BASE_STATS_FIELDS);
const EQUIPMENT: Schema = Schema::new("party member equipment", EQUIPMENT_FIELDS);

#[derive(Debug)]
pub struct PartyMemberTable {
    weapons: Arc<WeaponsRepository>,
    armour: Arc<ArmourRepository>,
}

impl PartyMemberTable {
    pub fn new(weapons: Arc<WeaponsRepository>, armour: Arc<ArmourRepository>) -> Self {
        Self { weapons, armour }
    }
}

impl DefinitionTable for PartyMemberTable {
    type Def = PartyMemberDef;
    const FILE: &'static str = "party_members.json";
    const KIND: &'static str = "party member";

    fn build(&self, raw: Value) -> Result<IndexMap<String, PartyMemberDef>> {
        let mut members = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let entry = SCHEMA.check(id, payload)?;
            let stats = BASE_STATS.check_in(
                entry.field_context("base_stats"),
                entry.value("base_stats")?,
            )?;
            let equipment = EQUIPMENT.check_in(
                entry.field_context("equipment"),
                entry.value("equipment")?,
            )?;

            let weapon_ids = equipment.str_list("weapons")?;
            check_weapons(&weapon_ids, entry.context(), &self.weapons)?;
            let slots = match equipment.get("armour") {
                Some(value) => {
                    armour_slots(value, &equipment.field_context("armour"), &self.armour)?
                }
                None => IndexMap::new(),
            };

            let member = PartyMemberDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                base_hp: stats.u32("max_hp")?,
                base_mp: stats.u32("max_mp")?,
                speed: stats.u32("speed")?,
                starting_level: entry.positive_or("starting_level", 1)?,
                weapon_ids,
                armour_id: slots.get(&ArmourSlot::Body).cloned(),
                armour_slots: slots,
                tags: entry.str_list("tags")?,
                starting_attributes: starting_attributes(
                    entry.get("starting_attributes"),
                    &entry.field_context("starting_attributes"),
                )?,
            };
            members.insert(id.to_string(), member);
        }
        Ok(members)
    }
}

pub type PartyMembersRepository = Repository<PartyMemberTable>;

impl Repository<PartyMemberTable> {
    pub fn new(
        definitions_dir: impl Into<PathBuf>,
        weapons: Arc<WeaponsRepository>,
        armour: Arc<ArmourRepository>,
    ) -> Self {
        Self::with_table(PartyMemberTable::new(weapons, armour), definitions_dir)
    }
}
