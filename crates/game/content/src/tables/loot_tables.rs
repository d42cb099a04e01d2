//! `loot_tables.json`: a top-level list of tag-filtered drop tables.

use std::path::PathBuf;
use std::sync::Arc;

use game_defs::{LootDropDef, LootTableDef};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::{require_list, require_mapping, require_non_empty_str};
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, reject_duplicate};
use crate::tables::items::ItemsRepository;

const FIELDS: &[Field] = &[
    Field::required("id", FieldKind::NonEmptyStr),
    Field::required("drops", FieldKind::List),
    Field::optional("required_enemy_tags", FieldKind::StrList),
    Field::optional("forbidden_enemy_tags", FieldKind::StrList),
];

const DROP_FIELDS: &[Field] = &[
    Field::required("item_id", FieldKind::Str),
    Field::required("chance", FieldKind::NonNegativeNumber),
    Field::optional("min_qty", FieldKind::PositiveInt),
    Field::optional("max_qty", FieldKind::PositiveInt),
];

const SCHEMA: Schema = Schema::new("loot table", FIELDS);
const DROP: Schema = Schema::new("loot drop", DROP_FIELDS);

#[derive(Debug)]
pub struct LootTableTable {
    items: Arc<ItemsRepository>,
}

impl LootTableTable {
    pub fn new(items: Arc<ItemsRepository>) -> Self {
        Self { items }
    }

    fn drop_def(&self, raw: &Value, context: String) -> Result<LootDropDef> {
        let drop = DROP.check_in(context, raw)?;
        let item_id = drop.str("item_id")?;
        if !self.items.contains(item_id)? {
            return Err(ContentError::reference(drop.context(), "item", item_id));
        }

        let chance = drop.number_or("chance", 0.0)?;
        if chance > 1.0 {
            return Err(ContentError::validation(
                drop.field_context("chance"),
                "must be between 0 and 1",
            ));
        }
        let min_qty = drop.positive_or("min_qty", 1)?;
        let max_qty = drop.positive_or("max_qty", min_qty)?;
        if max_qty < min_qty {
            return Err(ContentError::validation(
                drop.field_context("max_qty"),
                format!("must be at least min_qty ({min_qty})"),
            ));
        }

        Ok(LootDropDef {
            item_id: item_id.to_string(),
            chance,
            min_qty,
            max_qty,
        })
    }
}

impl DefinitionTable for LootTableTable {
    type Def = LootTableDef;
    const FILE: &'static str = "loot_tables.json";
    const KIND: &'static str = "loot table";

    fn build(&self, raw: Value) -> Result<IndexMap<String, LootTableDef>> {
        let mut tables = IndexMap::new();
        for (index, payload) in require_list(&raw, Self::FILE)?.iter().enumerate() {
            let id_context = format!("loot_tables.json [{index}] id");
            let id_value = require_mapping(payload, &format!("loot_tables.json [{index}]"))?
                .get("id")
                .ok_or_else(|| ContentError::validation(&id_context, "is required"))?;
            let id = require_non_empty_str(id_value, &id_context)?;
            reject_duplicate(&tables, Self::KIND, id)?;

            let entry = SCHEMA.check(id, payload)?;
            let drops = entry
                .list("drops")?
                .iter()
                .enumerate()
                .map(|(drop_index, raw_drop)| {
                    self.drop_def(raw_drop, format!("{}[{drop_index}]", entry.field_context("drops")))
                })
                .collect::<Result<Vec<_>>>()?;

            let table = LootTableDef {
                id: id.to_string(),
                required_tags: entry.str_list("required_enemy_tags")?,
                forbidden_tags: entry.str_list("forbidden_enemy_tags")?,
                drops,
            };
            tables.insert(id.to_string(), table);
        }
        Ok(tables)
    }
}

pub type LootTablesRepository = Repository<LootTableTable>;

impl Repository<LootTableTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>, items: Arc<ItemsRepository>) -> Self {
        Self::with_table(LootTableTable::new(items), definitions_dir)
    }

    /// Every table whose tag filters accept an enemy carrying `enemy_tags`.
    pub fn matching<S: AsRef<str>>(&self, enemy_tags: &[S]) -> Result<Vec<&LootTableDef>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|table| table.applies_to(enemy_tags))
            .collect())
    }
}
