//! `armour.json`: `{id: {name, slot, defense, value, ...}}`.

use std::path::PathBuf;

use game_defs::{ArmourDef, ArmourSlot};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("slot", FieldKind::OneOf(&ArmourSlot::NAMES)),
    Field::required("defense", FieldKind::NonNegativeInt),
    Field::required("value", FieldKind::NonNegativeInt),
    Field::optional("tags", FieldKind::StrList),
    Field::optional("hp_bonus", FieldKind::Int),
];

const SCHEMA: Schema = Schema::new("armour", FIELDS);

#[derive(Debug, Default)]
pub struct ArmourTable;

impl DefinitionTable for ArmourTable {
    type Def = ArmourDef;
    const FILE: &'static str = "armour.json";
    const KIND: &'static str = "armour";

    fn build(&self, raw: Value) -> Result<IndexMap<String, ArmourDef>> {
        let mut armour = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let entry = SCHEMA.check(id, payload)?;
            let piece = ArmourDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                slot: entry.one_of("slot", &ArmourSlot::NAMES)?,
                defense: entry.u32("defense")?,
                value: entry.u32("value")?,
                tags: entry.str_list("tags")?,
                hp_bonus: entry.i32_or("hp_bonus", 0)?,
            };
            armour.insert(id.to_string(), piece);
        }
        Ok(armour)
    }
}

pub type ArmourRepository = Repository<ArmourTable>;

impl Repository<ArmourTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(ArmourTable, definitions_dir)
    }
}
