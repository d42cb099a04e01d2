//! `items.json`: `{id: {name, kind, value, ...}}`.

use std::path::PathBuf;

use game_defs::{ItemDef, ItemTargeting};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("kind", FieldKind::Str),
    Field::required("value", FieldKind::NonNegativeInt),
    Field::optional("description", FieldKind::Str),
    Field::optional("targeting", FieldKind::OneOf(&ItemTargeting::NAMES)),
    Field::optional("heal_hp", FieldKind::NonNegativeInt),
    Field::optional("heal_mp", FieldKind::NonNegativeInt),
    Field::optional("restore_energy", FieldKind::NonNegativeInt),
    Field::optional("debuff_attack_flat", FieldKind::NonNegativeInt),
    Field::optional("debuff_defense_flat", FieldKind::NonNegativeInt),
];

const SCHEMA: Schema = Schema::new("item", FIELDS);

#[derive(Debug, Default)]
pub struct ItemTable;

impl DefinitionTable for ItemTable {
    type Def = ItemDef;
    const FILE: &'static str = "items.json";
    const KIND: &'static str = "item";

    fn build(&self, raw: Value) -> Result<IndexMap<String, ItemDef>> {
        let mut items = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            let entry = SCHEMA.check(id, payload)?;
            let targeting = match entry.get("targeting") {
                Some(_) => entry.one_of("targeting", &ItemTargeting::NAMES)?,
                None => ItemTargeting::default(),
            };
            let item = ItemDef {
                id: id.to_string(),
                name: entry.str("name")?.to_string(),
                kind: entry.str("kind")?.to_string(),
                description: entry.opt_str("description")?.unwrap_or_default().to_string(),
                value: entry.u32("value")?,
                targeting,
                heal_hp: entry.u32_or("heal_hp", 0)?,
                heal_mp: entry.u32_or("heal_mp", 0)?,
                restore_energy: entry.u32_or("restore_energy", 0)?,
                debuff_attack_flat: entry.u32_or("debuff_attack_flat", 0)?,
                debuff_defense_flat: entry.u32_or("debuff_defense_flat", 0)?,
            };
            items.insert(id.to_string(), item);
        }
        Ok(items)
    }
}

pub type ItemsRepository = Repository<ItemTable>;

impl Repository<ItemTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(ItemTable, definitions_dir)
    }
}
