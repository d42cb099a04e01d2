//! Story nodes, spread over `story/index.json` and `story/chapters/*.json`.
//!
//! The index lists chapter files in order. Chapters are merged into one node
//! table before validation, so links may cross chapter boundaries.

use std::path::{Path, PathBuf};

use game_defs::{StoryChoiceDef, StoryEffectDef, StoryNodeDef};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{ContentError, Result};
use crate::repository::fields::{require_list, require_mapping, require_str};
use crate::repository::schema::{Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::source::read_json;

const NODE_FIELDS: &[Field] = &[
    Field::required("text", FieldKind::Str),
    Field::optional("effects", FieldKind::List),
    Field::optional("choices", FieldKind::List),
    Field::optional("next", FieldKind::Str),
];

const CHOICE_FIELDS: &[Field] = &[
    Field::required("label", FieldKind::Str),
    Field::required("next", FieldKind::Str),
    Field::optional("effects", FieldKind::List),
];

const NODE: Schema = Schema::new("story node", NODE_FIELDS);
const CHOICE: Schema = Schema::new("story choice", CHOICE_FIELDS);

pub const CHAPTERS_DIR: &str = "chapters";

#[derive(Debug, Default)]
pub struct StoryTable;

impl StoryTable {
    /// Merges every chapter listed by the index into one `{node_id: payload}`
    /// object. A node id appearing in two chapters is rejected.
    fn merge_chapters(index_path: &Path) -> Result<Value> {
        let index = read_json(index_path)?;
        let index = require_mapping(&index, "story index")?;
        let chapters: &[Value] = match index.get("chapters") {
            Some(value) => require_list(value, "story index chapters")?,
            None => &[],
        };
        if chapters.is_empty() {
            return Err(ContentError::validation(
                "story index",
                "must list at least one chapter",
            ));
        }

        let chapters_dir = index_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CHAPTERS_DIR);
        let mut merged = Map::new();
        for chapter in chapters {
            let chapter_name = require_str(chapter, "story index chapter entry")?;
            let chapter_doc = read_json(&chapters_dir.join(chapter_name))?;
            let nodes = require_mapping(&chapter_doc, &format!("chapter '{chapter_name}'"))?;
            for (node_id, payload) in nodes {
                if merged.contains_key(node_id) {
                    return Err(ContentError::validation(
                        format!("story node '{node_id}'"),
                        format!("is defined more than once (again in chapter '{chapter_name}')"),
                    ));
                }
                merged.insert(node_id.clone(), payload.clone());
            }
        }
        Ok(Value::Object(merged))
    }
}

fn effects(value: Option<&Value>, context: &str) -> Result<Vec<StoryEffectDef>> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(Vec::new());
    };
    require_list(value, context)?
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let effect_context = format!("{context}[{index}]");
            let mut data = require_mapping(raw, &effect_context)?.clone();
            let effect_type = match data.remove("type") {
                Some(Value::String(effect_type)) => effect_type,
                Some(_) => {
                    return Err(ContentError::validation(
                        format!("{effect_context} type"),
                        "must be a string",
                    ));
                }
                None => {
                    return Err(ContentError::validation(
                        format!("{effect_context} type"),
                        "is required",
                    ));
                }
            };
            Ok(StoryEffectDef { effect_type, data })
        })
        .collect()
}

impl DefinitionTable for StoryTable {
    type Def = StoryNodeDef;
    const FILE: &'static str = "story/index.json";
    const KIND: &'static str = "story node";

    fn read(&self, path: &Path) -> Result<Value> {
        Self::merge_chapters(path)
    }

    fn build(&self, raw: Value) -> Result<IndexMap<String, StoryNodeDef>> {
        let mut nodes = IndexMap::new();
        for (id, payload) in id_mapping(&raw, "story")? {
            let entry = NODE.check(id, payload)?;

            let mut choices = Vec::new();
            for (index, raw_choice) in entry.list_or_empty("choices")?.iter().enumerate() {
                let choice_context = format!("{}[{index}]", entry.field_context("choices"));
                let choice = CHOICE.check_in(choice_context, raw_choice)?;
                choices.push(StoryChoiceDef {
                    label: choice.str("label")?.to_string(),
                    next_node_id: choice.str("next")?.to_string(),
                    effects: effects(choice.get("effects"), &choice.field_context("effects"))?,
                });
            }

            let node = StoryNodeDef {
                id: id.to_string(),
                text: entry.str("text")?.to_string(),
                effects: effects(entry.get("effects"), &entry.field_context("effects"))?,
                choices,
                next_node_id: entry.opt_str("next")?.map(str::to_string),
            };
            nodes.insert(id.to_string(), node);
        }

        for node in nodes.values() {
            for target in node.successors() {
                if !nodes.contains_key(target) {
                    return Err(ContentError::reference(
                        format!("story node '{}'", node.id),
                        "story node",
                        target,
                    ));
                }
            }
        }
        Ok(nodes)
    }
}

pub type StoryRepository = Repository<StoryTable>;

impl Repository<StoryTable> {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_table(StoryTable, definitions_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::write_json;
    use serde_json::json;

    fn story(chapters: &[(&str, Value)]) -> (tempfile::TempDir, StoryRepository) {
        let dir = tempfile::tempdir().unwrap();
        let names: Vec<&str> = chapters.iter().map(|(name, _)| *name).collect();
        write_json(dir.path(), "story/index.json", json!({"chapters": names}));
        for (name, nodes) in chapters {
            write_json(dir.path(), &format!("story/chapters/{name}"), nodes.clone());
        }
        let repo = StoryRepository::new(dir.path());
        (dir, repo)
    }

    #[test]
    fn chapters_are_merged_in_index_order() {
        let (_dir, repo) = story(&[
            (
                "01_intro.json",
                json!({
                    "intro": {
                        "text": "You wake.",
                        "effects": [{"type": "set_flag", "flag": "awake", "value": true}],
                        "next": "crossroads"
                    }
                }),
            ),
            (
                "02_road.json",
                json!({
                    "crossroads": {
                        "text": "Two paths.",
                        "choices": [
                            {"label": "Left", "next": "intro"},
                            {"label": "Right", "next": "crossroads", "effects": [{"type": "gain_gold", "amount": 5}]}
                        ]
                    }
                }),
            ),
        ]);

        assert_eq!(repo.ids().unwrap(), ["intro", "crossroads"]);
        let intro = repo.get("intro").unwrap();
        assert_eq!(intro.effects[0].effect_type, "set_flag");
        assert_eq!(intro.effects[0].get("flag"), Some(&json!("awake")));
        assert!(!intro.effects[0].data.contains_key("type"));

        let crossroads = repo.get("crossroads").unwrap();
        assert_eq!(crossroads.choices.len(), 2);
        assert_eq!(crossroads.choices[1].effects[0].get("amount"), Some(&json!(5)));
        assert_eq!(crossroads.next_node_id, None);
    }

    #[test]
    fn dangling_next_is_reference_failure() {
        let (_dir, repo) = story(&[(
            "01.json",
            json!({"intro": {"text": "...", "next": "nowhere"}}),
        )]);
        let err = repo.all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(
            err.to_string(),
            "story node 'intro' references missing story node 'nowhere'"
        );
    }

    #[test]
    fn dangling_choice_is_reference_failure() {
        let (_dir, repo) = story(&[(
            "01.json",
            json!({"intro": {"text": "...", "choices": [{"label": "Go", "next": "void"}]}}),
        )]);
        assert_eq!(repo.all().unwrap_err().kind(), ErrorKind::Reference);
    }

    #[test]
    fn duplicate_node_across_chapters_is_validation_failure() {
        let (_dir, repo) = story(&[
            ("01.json", json!({"intro": {"text": "a"}})),
            ("02.json", json!({"intro": {"text": "b"}})),
        ]);
        let err = repo.all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().starts_with("story node 'intro' is defined more than once"));
    }

    #[test]
    fn empty_index_is_validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "story/index.json", json!({"chapters": []}));
        let err = StoryRepository::new(dir.path()).all().unwrap_err();
        assert_eq!(err.to_string(), "story index must list at least one chapter");
    }

    #[test]
    fn missing_chapter_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "story/index.json", json!({"chapters": ["ghost.json"]}));
        let err = StoryRepository::new(dir.path()).all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
    }

    #[test]
    fn effect_without_type_is_rejected() {
        let (_dir, repo) = story(&[(
            "01.json",
            json!({"intro": {"text": "...", "effects": [{"flag": "x"}]}}),
        )]);
        let err = repo.all().unwrap_err();
        assert_eq!(err.to_string(), "story node 'intro' effects[0] type is required");
    }
}
