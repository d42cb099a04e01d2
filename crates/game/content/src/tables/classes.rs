//! `classes.json`: playable classes and their starting loadouts.

use std::path::PathBuf;
use std::sync::Arc;

use game_defs::{ArmourSlot, ClassDef};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::require_u32;
use crate::repository::schema::{Entry, Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::tables::armour::ArmourRepository;
use crate::tables::loadout::{armour_slots, check_weapons, starting_attributes};
use crate::tables::summons::SummonsRepository;
use crate::tables::weapons::WeaponsRepository;

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("base_hp", FieldKind::NonNegativeInt),
    Field::required("base_mp", FieldKind::NonNegativeInt),
    Field::required("speed", FieldKind::NonNegativeInt),
    Field::required("starting_weapon", FieldKind::NonEmptyStr),
    Field::required("starting_armour", FieldKind::Any),
    Field::optional("starting_weapons", FieldKind::StrList),
    Field::optional("starting_items", FieldKind::Object),
    Field::optional("starting_abilities", FieldKind::StrList),
    Field::optional("starting_level", FieldKind::PositiveInt),
    Field::optional("starting_attributes", FieldKind::Object),
    Field::optional("known_summons", FieldKind::StrList),
    Field::optional("default_equipped_summons", FieldKind::StrList),
];

const SCHEMA: Schema = Schema::new("class", FIELDS);

/// Builds classes, checking every equipment and summon id against the tables
/// it was constructed with.
#[derive(Debug)]
pub struct ClassTable {
    weapons: Arc<WeaponsRepository>,
    armour: Arc<ArmourRepository>,
    summons: Arc<SummonsRepository>,
}

impl ClassTable {
    pub fn new(
        weapons: Arc<WeaponsRepository>,
        armour: Arc<ArmourRepository>,
        summons: Arc<SummonsRepository>,
    ) -> Self {
        Self {
            weapons,
            armour,
            summons,
        }
    }

    fn summon_list(&self, entry: &Entry<'_>, field: &str) -> Result<Vec<String>> {
        let summon_ids = entry.str_list(field)?;
        for (index, summon_id) in summon_ids.iter().enumerate() {
            if !self.summons.contains(summon_id)? {
                return Err(ContentError::reference(
                    format!("{}[{index}]", entry.field_context(field)),
                    "summon",
                    summon_id.as_str(),
                ));
            }
        }
        Ok(summon_ids)
    }
}

impl DefinitionTable for ClassTable {
    type Def = ClassDef;
    const FILE: &'static str = "classes.json";
    const KIND: &'static str = "class";

    fn build(&self, raw: Value) -> Result<IndexMap<String, ClassDef>> {
        let mut classes = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let entry = SCHEMA.check(id, payload)?;
            let context = entry.context().to_string();

            let starting_weapon = entry.non_empty_str("starting_weapon")?.to_string();
            let mut starting_weapons = entry.str_list("starting_weapons")?;
            if !starting_weapons.contains(&starting_weapon) {
                starting_weapons.insert(0, starting_weapon.clone());
            }
            check_weapons(&starting_weapons, &context, &self.weapons)?;

            let starting_armour_slots = armour_slots(
                entry.value("starting_armour")?,
                &entry.field_context("starting_armour"),
                &self.armour,
            )?;
            let starting_armour = starting_armour_slots
                .get(&ArmourSlot::Body)
                .cloned()
                .ok_or_else(|| {
                    ContentError::validation(
                        entry.field_context("starting_armour"),
                        "must include a body slot",
                    )
                })?;

            let mut starting_items = IndexMap::new();
            if let Some(items) = entry.opt_object("starting_items")? {
                for (item_id, quantity) in items {
                    let quantity_context =
                        format!("{}[{item_id}]", entry.field_context("starting_items"));
                    starting_items.insert(item_id.clone(), require_u32(quantity, &quantity_context)?);
                }
            }

            let class = ClassDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                base_hp: entry.u32("base_hp")?,
                base_mp: entry.u32("base_mp")?,
                speed: entry.u32("speed")?,
                starting_level: entry.positive_or("starting_level", 1)?,
                starting_weapon_id: starting_weapon,
                starting_armour_id: starting_armour,
                starting_weapons,
                starting_armour_slots,
                starting_items,
                starting_abilities: entry.str_list("starting_abilities")?,
                starting_attributes: starting_attributes(
                    entry.get("starting_attributes"),
                    &entry.field_context("starting_attributes"),
                )?,
                known_summons: self.summon_list(&entry, "known_summons")?,
                default_equipped_summons: self.summon_list(&entry, "default_equipped_summons")?,
            };
            classes.insert(id.to_string(), class);
        }
        Ok(classes)
    }
}

pub type ClassesRepository = Repository<ClassTable>;

impl Repository<ClassTable> {
    pub fn new(
        definitions_dir: impl Into<PathBuf>,
        weapons: Arc<WeaponsRepository>,
        armour: Arc<ArmourRepository>,
        summons: Arc<SummonsRepository>,
    ) -> Self {
        Self::with_table(ClassTable::new(weapons, armour, summons), definitions_dir)
    }

    /// Builds its own weapon, armour and summon repositories over the same
    /// directory.
    pub fn standalone(definitions_dir: impl Into<PathBuf>) -> Self {
        let dir = definitions_dir.into();
        let weapons = Arc::new(WeaponsRepository::new(&dir));
        let armour = Arc::new(ArmourRepository::new(&dir));
        let summons = Arc::new(SummonsRepository::new(&dir));
        Self::new(dir, weapons, armour, summons)
    }
}
