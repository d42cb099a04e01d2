//! `floors.json`: dungeon floors and their anchor locations.
//!
//! Locations point back at floors, so floors cannot depend on the locations
//! repository. Instead the floor table reads only the keys of
//! `locations.json` to check its location ids.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use game_defs::FloorDef;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::require_mapping;
use crate::repository::schema::{Entry, Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::source::read_json;

const FIELDS: &[Field] = &[
    Field::optional("id", FieldKind::Str),
    Field::required("name", FieldKind::NonEmptyStr),
    Field::required("level", FieldKind::NonNegativeInt),
    Field::required("starting_location_id", FieldKind::NonEmptyStr),
    Field::optional("boss_location_id", FieldKind::NonEmptyStr),
    Field::optional("next_floor_id", FieldKind::NonEmptyStr),
    Field::optional("notes", FieldKind::Str),
];

const SCHEMA: Schema = Schema::new("floor", FIELDS);

pub const LOCATIONS_FILE: &str = "locations.json";

#[derive(Debug)]
pub struct FloorTable {
    locations_file: PathBuf,
}

impl FloorTable {
    pub fn new(definitions_dir: &Path) -> Self {
        Self {
            locations_file: definitions_dir.join(LOCATIONS_FILE),
        }
    }

    fn location_ids(&self) -> Result<HashSet<String>> {
        let raw = read_json(&self.locations_file)?;
        Ok(require_mapping(&raw, LOCATIONS_FILE)?.keys().cloned().collect())
    }
}

fn location_id(
    entry: &Entry<'_>,
    field: &str,
    known: &HashSet<String>,
) -> Result<Option<String>> {
    let Some(id) = entry.opt_non_empty_str(field)?.map(str::trim) else {
        return Ok(None);
    };
    if !known.contains(id) {
        return Err(ContentError::reference(entry.field_context(field), "location", id));
    }
    Ok(Some(id.to_string()))
}

impl DefinitionTable for FloorTable {
    type Def = FloorDef;
    const FILE: &'static str = "floors.json";
    const KIND: &'static str = "floor";

    fn build(&self, raw: Value) -> Result<IndexMap<String, FloorDef>> {
        let locations = self.location_ids()?;
        let mut floors = IndexMap::new();
        for (id, payload) in id_mapping(&raw, Self::FILE)? {
            if id.trim().is_empty() {
                return Err(ContentError::validation("floors.json key", "must not be empty"));
            }
            let entry = SCHEMA.check(id, payload)?;
            if let Some(embedded) = entry.opt_str("id")?
                && embedded != id
            {
                return Err(ContentError::validation(
                    entry.field_context("id"),
                    format!("must match its key, got '{embedded}'"),
                ));
            }

            let starting_location_id = location_id(&entry, "starting_location_id", &locations)?
                .ok_or_else(|| {
                    ContentError::validation(entry.field_context("starting_location_id"), "is required")
                })?;
            let floor = FloorDef {
                id: id.to_string(),
                name: entry.non_empty_str("name")?.trim().to_string(),
                level: entry.u32("level")?,
                starting_location_id,
                boss_location_id: location_id(&entry, "boss_location_id", &locations)?,
                next_floor_id: entry.opt_non_empty_str("next_floor_id")?.map(str::to_string),
                notes: entry.opt_str("notes")?.map(str::to_string),
            };
            floors.insert(id.to_string(), floor);
        }
        Ok(floors)
    }
}

pub type FloorsRepository = Repository<FloorTable>;

impl Repository<FloorTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        let dir = definitions_dir.into();
        Self::with_table(FloorTable::new(&dir), dir)
    }
}
