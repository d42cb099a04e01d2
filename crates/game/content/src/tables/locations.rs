//! `locations.json`: floor-scoped locations and their gated connections.

use std::path::PathBuf;
use std::sync::Arc;

use game_defs::{LocationConnectionDef, LocationDef, LocationType, NpcPresenceDef};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::require_tag_set;
use crate::repository::schema::{Entry, Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::tables::floors::FloorsRepository;

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::NonEmptyStr),
    Field::required("description", FieldKind::Str),
    Field::required("floor_id", FieldKind::Str),
    Field::required("type", FieldKind::OneOf(&LocationType::NAMES)),
    Field::required("tags", FieldKind::StrList),
    Field::required("connections", FieldKind::List),
    Field::optional("area_level", FieldKind::NonNegativeInt),
    Field::optional("entry_story_node_id", FieldKind::Str),
    Field::optional("entry_story_repeatable", FieldKind::Bool),
    Field::optional("npcs_present", FieldKind::List),
];

const CONNECTION_FIELDS: &[Field] = &[
    Field::required("to", FieldKind::NonEmptyStr),
    Field::required("label", FieldKind::Str),
    Field::optional("progresses_story", FieldKind::Bool),
    Field::optional("requires_quest_active", FieldKind::Str),
    Field::optional("hide_if_quest_completed", FieldKind::Str),
    Field::optional("hide_if_quest_turned_in", FieldKind::Str),
    Field::optional("show_if_flag_true", FieldKind::Str),
    Field::optional("hide_if_flag_true", FieldKind::Str),
];

const NPC_FIELDS: &[Field] = &[
    Field::required("npc_id", FieldKind::Str),
    Field::optional("talk_node_id", FieldKind::Str),
    Field::optional("quest_hub_node_id", FieldKind::Str),
];

const SCHEMA: Schema = Schema::new("location", FIELDS);
const CONNECTION: Schema = Schema::new("location connection", CONNECTION_FIELDS);
const NPC: Schema = Schema::new("location npc", NPC_FIELDS);

#[derive(Debug)]
pub struct LocationTable {
    floors: Arc<FloorsRepository>,
}

impl LocationTable {
    pub fn new(floors: Arc<FloorsRepository>) -> Self {
        Self { floors }
    }
}

fn gate(entry: &Entry<'_>, name: &str) -> Result<Option<String>> {
    Ok(entry.opt_str(name)?.map(str::to_string))
}

fn connection(raw: &Value, context: String) -> Result<LocationConnectionDef> {
    let entry = CONNECTION.check_in(context, raw)?;
    Ok(LocationConnectionDef {
        to: entry.non_empty_str("to")?.to_string(),
        label: entry.str("label")?.to_string(),
        progresses_story: entry.bool_or("progresses_story", false)?,
        requires_quest_active: gate(&entry, "requires_quest_active")?,
        hide_if_quest_completed: gate(&entry, "hide_if_quest_completed")?,
        hide_if_quest_turned_in: gate(&entry, "hide_if_quest_turned_in")?,
        show_if_flag_true: gate(&entry, "show_if_flag_true")?,
        hide_if_flag_true: gate(&entry, "hide_if_flag_true")?,
    })
}

fn npc(raw: &Value, context: String) -> Result<NpcPresenceDef> {
    let entry = NPC.check_in(context, raw)?;
    Ok(NpcPresenceDef {
        npc_id: entry.str("npc_id")?.to_string(),
        talk_node_id: gate(&entry, "talk_node_id")?,
        quest_hub_node_id: gate(&entry, "quest_hub_node_id")?,
    })
}

impl DefinitionTable for LocationTable {
    type Def = LocationDef;
    const FILE: &'static str = "locations.json";
    const KIND: &'static str = "location";

    fn build(&self, raw: Value) -> Result<IndexMap<String, LocationDef>> {
        let staged: IndexMap<&str, &Value> = id_mapping(&raw, Self::FILE)?.collect();
        if staged.keys().any(|id| id.trim().is_empty()) {
            return Err(ContentError::validation("locations.json key", "must not be empty"));
        }

        let mut locations = IndexMap::new();
        for (&id, &payload) in &staged {
            let entry = SCHEMA.check(id, payload)?;

            let floor_id = entry.str("floor_id")?;
            if !self.floors.contains(floor_id)? {
                return Err(ContentError::reference(entry.context(), "floor", floor_id));
            }
            let tags = entry.str_list("tags")?;
            require_tag_set(&tags, &entry.field_context("tags"))?;

            let mut connections = Vec::new();
            for (index, raw_connection) in entry.list("connections")?.iter().enumerate() {
                let context = format!("{}[{index}]", entry.field_context("connections"));
                let link = connection(raw_connection, context)?;
                if !staged.contains_key(link.to.as_str()) {
                    return Err(ContentError::reference(entry.context(), "location", link.to));
                }
                connections.push(link);
            }

            let npcs_present = entry
                .list_or_empty("npcs_present")?
                .iter()
                .enumerate()
                .map(|(index, raw_npc)| {
                    npc(raw_npc, format!("{}[{index}]", entry.field_context("npcs_present")))
                })
                .collect::<Result<Vec<_>>>()?;

            let location = LocationDef {
                id: id.to_string(),
                name: entry.non_empty_str("name")?.to_string(),
                description: entry.str("description")?.to_string(),
                floor_id: floor_id.to_string(),
                location_type: entry.one_of("type", &LocationType::NAMES)?,
                area_level: entry.opt_u32("area_level")?,
                tags,
                connections,
                entry_story_node_id: gate(&entry, "entry_story_node_id")?,
                entry_story_repeatable: entry.bool_or("entry_story_repeatable", false)?,
                npcs_present,
            };
            locations.insert(id.to_string(), location);
        }
        Ok(locations)
    }
}

pub type LocationsRepository = Repository<LocationTable>;

impl Repository<LocationTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>, floors: Arc<FloorsRepository>) -> Self {
        Self::with_table(LocationTable::new(floors), definitions_dir)
    }

    /// Builds its own floors repository over the same directory.
    pub fn standalone(definitions_dir: impl Into<PathBuf>) -> Self {
        let dir = definitions_dir.into();
        let floors = Arc::new(FloorsRepository::new(&dir));
        Self::new(dir, floors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::write_json;
    use serde_json::json;

    fn fixture(locations: Value) -> (tempfile::TempDir, LocationsRepository) {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "floors.json",
            json!({"floor_one": {"name": "F1", "level": 1, "starting_location_id": "square"}}),
        );
        write_json(dir.path(), "locations.json", locations);
        let repo = LocationsRepository::standalone(dir.path());
        (dir, repo)
    }

    fn square() -> Value {
        json!({
            "name": "Town Square", "description": "Busy.", "floor_id": "floor_one",
            "type": "town", "tags": ["town", "safe"],
            "connections": [
                {"to": "gate", "label": "To the gate", "progresses_story": true,
                 "show_if_flag_true": "gate_opened"}
            ],
            "npcs_present": [{"npc_id": "elder", "talk_node_id": "elder_talk"}]
        })
    }

    fn gate_location() -> Value {
        json!({
            "name": "Gate", "description": "", "floor_id": "floor_one", "type": "gate",
            "tags": ["gate"], "area_level": 2,
            "connections": [{"to": "square", "label": "Back"}]
        })
    }

    #[test]
    fn builds_locations_with_gates_and_npcs() {
        let (_dir, repo) = fixture(json!({"square": square(), "gate": gate_location()}));
        let square = repo.get("square").unwrap();

        assert_eq!(square.location_type, LocationType::Town);
        assert_eq!(square.area_level, None);
        assert!(!square.entry_story_repeatable);
        let link = &square.connections[0];
        assert!(link.progresses_story);
        assert_eq!(link.show_if_flag_true.as_deref(), Some("gate_opened"));
        assert!(!link.is_unconditional());
        assert_eq!(square.npcs_present[0].talk_node_id.as_deref(), Some("elder_talk"));
        assert_eq!(square.npcs_present[0].quest_hub_node_id, None);

        let gate = repo.get("gate").unwrap();
        assert_eq!(gate.area_level, Some(2));
        assert!(gate.connections[0].is_unconditional());
    }

    #[test]
    fn unknown_floor_is_reference_failure() {
        let mut square = square();
        square["floor_id"] = json!("floor_nine");
        let (_dir, repo) = fixture(json!({"square": square, "gate": gate_location()}));
        let err = repo.all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(
            err.to_string(),
            "location 'square' references missing floor 'floor_nine'"
        );
    }

    #[test]
    fn unknown_connection_is_reference_failure() {
        let (_dir, repo) = fixture(json!({"square": square()}));
        let err = repo.all().unwrap_err();
        assert_eq!(
            err.to_string(),
            "location 'square' references missing location 'gate'"
        );
    }

    #[test]
    fn unknown_type_is_validation_failure() {
        let mut square = square();
        square["type"] = json!("dungeon");
        let (_dir, repo) = fixture(json!({"square": square, "gate": gate_location()}));
        let err = repo.all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().starts_with("location 'square' type must be one of"));
    }

    #[test]
    fn non_boolean_gate_flag_is_validation_failure() {
        let mut square = square();
        square["connections"][0]["progresses_story"] = json!("yes");
        let (_dir, repo) = fixture(json!({"square": square, "gate": gate_location()}));
        let err = repo.all().unwrap_err();
        assert_eq!(
            err.to_string(),
            "location 'square' connections[0] progresses_story must be a boolean"
        );
    }
}
