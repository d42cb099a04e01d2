//! `areas.json`: the overworld travel graph, stored as `{"areas": [...]}`.

use std::path::PathBuf;

use game_defs::{AreaConnectionDef, AreaDef};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::{require_list, require_mapping, require_non_empty_str, require_tag_set};
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, reject_duplicate};

const FIELDS: &[Field] = &[
    Field::required("id", FieldKind::NonEmptyStr),
    Field::required("name", FieldKind::Str),
    Field::required("description", FieldKind::Str),
    Field::required("tags", FieldKind::StrList),
    Field::required("connections", FieldKind::List),
    Field::optional("entry_story_node_id", FieldKind::Str),
];

const CONNECTION_FIELDS: &[Field] = &[
    Field::required("to", FieldKind::NonEmptyStr),
    Field::required("label", FieldKind::Str),
];

const SCHEMA: Schema = Schema::new("area", FIELDS);
const CONNECTION: Schema = Schema::new("area connection", CONNECTION_FIELDS);

#[derive(Debug, Default)]
pub struct AreaTable;

impl DefinitionTable for AreaTable {
    type Def = AreaDef;
    const FILE: &'static str = "areas.json";
    const KIND: &'static str = "area";

    fn build(&self, raw: Value) -> Result<IndexMap<String, AreaDef>> {
        let container = require_mapping(&raw, Self::FILE)?;
        let entries = match container.get("areas") {
            Some(value) => require_list(value, "areas.json areas")?,
            None => return Err(ContentError::validation("areas.json areas", "is required")),
        };

        // Ids first, so connections may point forward in the list.
        let mut staged = IndexMap::new();
        for (index, payload) in entries.iter().enumerate() {
            let context = format!("areas.json areas[{index}]");
            let map = require_mapping(payload, &context)?;
            let id_value = map
                .get("id")
                .ok_or_else(|| ContentError::validation(format!("{context} id"), "is required"))?;
            let id = require_non_empty_str(id_value, &format!("{context} id"))?;
            reject_duplicate(&staged, Self::KIND, id)?;
            staged.insert(id.to_string(), payload);
        }

        let mut areas = IndexMap::new();
        for (id, payload) in &staged {
            let entry = SCHEMA.check(id, payload)?;
            let tags = entry.str_list("tags")?;
            require_tag_set(&tags, &entry.field_context("tags"))?;

            let mut connections = Vec::new();
            for (index, raw) in entry.list("connections")?.iter().enumerate() {
                let context = format!("{}[{index}]", entry.field_context("connections"));
                let connection = CONNECTION.check_in(context, raw)?;
                let to = connection.non_empty_str("to")?;
                if !staged.contains_key(to) {
                    return Err(ContentError::reference(entry.context(), "area", to));
                }
                connections.push(AreaConnectionDef {
                    to: to.to_string(),
                    label: connection.str("label")?.to_string(),
                });
            }

            let area = AreaDef {
                id: id.clone(),
                name: entry.str("name")?.to_string(),
                description: entry.str("description")?.to_string(),
                tags,
                connections,
                entry_story_node_id: entry.opt_str("entry_story_node_id")?.map(str::to_string),
            };
            areas.insert(id.clone(), area);
        }
        Ok(areas)
    }
}

pub type AreasRepository = Repository<AreaTable>;

impl Repository<AreaTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(AreaTable, definitions_dir)
    }
}
