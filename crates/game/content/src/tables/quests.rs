//! `quests.json`: quests under a top-level `{"quests": {...}}` object.
//!
//! Objective and reward items, visit targets and the turn-in story node are
//! checked against their tables when the file loads, so a quest naming
//! missing content never reaches the quest service.

use std::path::PathBuf;
use std::sync::Arc;

use game_defs::{
    QuestDef, QuestObjective, QuestObjectiveDef, QuestPrereqDef, QuestRewardDef,
    QuestRewardItemDef, QuestTurnInDef,
};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::repository::fields::{require_bool, require_mapping};
use crate::repository::schema::{Entry, Field, FieldKind, Schema};
use crate::repository::{DefinitionTable, Repository, id_mapping};
use crate::tables::items::ItemsRepository;
use crate::tables::locations::LocationsRepository;
use crate::tables::story::StoryRepository;

const FIELDS: &[Field] = &[
    Field::required("quest_id", FieldKind::Str),
    Field::required("name", FieldKind::Str),
    Field::required("objectives", FieldKind::List),
    Field::required("rewards", FieldKind::Object),
    Field::optional("prereqs", FieldKind::Object),
    Field::optional("turn_in", FieldKind::Object),
    Field::optional("accept_flags", FieldKind::StrList),
    Field::optional("complete_flags", FieldKind::StrList),
];

const PREREQ_FIELDS: &[Field] = &[
    Field::optional("required_flags", FieldKind::StrList),
    Field::optional("forbidden_flags", FieldKind::StrList),
];

const OBJECTIVE_FIELDS: &[Field] = &[
    Field::required("type", FieldKind::OneOf(&QuestObjective::TYPES)),
    Field::required("label", FieldKind::Str),
    Field::optional("quantity", FieldKind::PositiveInt),
    Field::optional("tag", FieldKind::Str),
    Field::optional("item_id", FieldKind::Str),
    Field::optional("area_id", FieldKind::Str),
];

const TURN_IN_FIELDS: &[Field] = &[
    Field::required("node_id", FieldKind::Str),
    Field::optional("npc_id", FieldKind::Str),
];

const REWARD_FIELDS: &[Field] = &[
    Field::optional("gold", FieldKind::NonNegativeInt),
    Field::optional("party_exp", FieldKind::NonNegativeInt),
    Field::optional("items", FieldKind::List),
    Field::optional("set_flags", FieldKind::Object),
];

const REWARD_ITEM_FIELDS: &[Field] = &[
    Field::required("item_id", FieldKind::Str),
    Field::optional("quantity", FieldKind::PositiveInt),
];

const SCHEMA: Schema = Schema::new("quest", FIELDS);
const PREREQS: Schema = Schema::new("quest prereqs", PREREQ_FIELDS);
const OBJECTIVE: Schema = Schema::new("quest objective", OBJECTIVE_FIELDS);
const TURN_IN: Schema = Schema::new("quest turn_in", TURN_IN_FIELDS);
const REWARDS: Schema = Schema::new("quest rewards", REWARD_FIELDS);
const REWARD_ITEM: Schema = Schema::new("quest reward item", REWARD_ITEM_FIELDS);

/// Quests check collected and rewarded items, visited locations and their
/// turn-in story node against the repositories they were built with.
#[derive(Debug)]
pub struct QuestTable {
    items: Arc<ItemsRepository>,
    locations: Arc<LocationsRepository>,
    story: Arc<StoryRepository>,
}

impl QuestTable {
    pub fn new(
        items: Arc<ItemsRepository>,
        locations: Arc<LocationsRepository>,
        story: Arc<StoryRepository>,
    ) -> Self {
        Self {
            items,
            locations,
            story,
        }
    }

    fn check_item(&self, item_id: &str, context: &str) -> Result<()> {
        if self.items.contains(item_id)? {
            Ok(())
        } else {
            Err(ContentError::reference(context, "item", item_id))
        }
    }

    fn prereqs(&self, entry: &Entry<'_>) -> Result<QuestPrereqDef> {
        let Some(raw) = entry.get("prereqs") else {
            return Ok(QuestPrereqDef::default());
        };
        let prereqs = PREREQS.check_in(entry.field_context("prereqs"), raw)?;
        Ok(QuestPrereqDef {
            required_flags: prereqs.str_list("required_flags")?,
            forbidden_flags: prereqs.str_list("forbidden_flags")?,
        })
    }

    fn objectives(&self, entry: &Entry<'_>) -> Result<Vec<QuestObjectiveDef>> {
        let raw_objectives = entry.list("objectives")?;
        if raw_objectives.is_empty() {
            return Err(ContentError::validation(
                entry.field_context("objectives"),
                "must list at least one objective",
            ));
        }

        let mut objectives = Vec::with_capacity(raw_objectives.len());
        for (index, raw) in raw_objectives.iter().enumerate() {
            let context = format!("{}[{index}]", entry.field_context("objectives"));
            let objective = OBJECTIVE.check_in(context, raw)?;
            let kind = match objective.str("type")? {
                "kill_tag" => QuestObjective::KillTag {
                    tag: objective.str("tag")?.to_string(),
                },
                "collect_item" => {
                    let item_id = objective.str("item_id")?;
                    self.check_item(item_id, objective.context())?;
                    QuestObjective::CollectItem {
                        item_id: item_id.to_string(),
                    }
                }
                _ => {
                    let area_id = objective.str("area_id")?;
                    if !self.locations.contains(area_id)? {
                        return Err(ContentError::reference(
                            objective.context(),
                            "location",
                            area_id,
                        ));
                    }
                    QuestObjective::VisitArea {
                        area_id: area_id.to_string(),
                    }
                }
            };
            objectives.push(QuestObjectiveDef {
                objective: kind,
                label: objective.str("label")?.to_string(),
                quantity: objective.positive_or("quantity", 1)?,
            });
        }
        Ok(objectives)
    }

    fn turn_in(&self, entry: &Entry<'_>) -> Result<Option<QuestTurnInDef>> {
        let Some(raw) = entry.get("turn_in") else {
            return Ok(None);
        };
        let turn_in = TURN_IN.check_in(entry.field_context("turn_in"), raw)?;
        let node_id = turn_in.str("node_id")?;
        if !self.story.contains(node_id)? {
            return Err(ContentError::reference(turn_in.context(), "story node", node_id));
        }
        Ok(Some(QuestTurnInDef {
            node_id: node_id.to_string(),
            npc_id: turn_in.opt_str("npc_id")?.map(str::to_string),
        }))
    }

    fn rewards(&self, entry: &Entry<'_>) -> Result<QuestRewardDef> {
        let rewards = REWARDS.check_in(entry.field_context("rewards"), entry.value("rewards")?)?;

        let mut items = Vec::new();
        for (index, raw) in rewards.list_or_empty("items")?.iter().enumerate() {
            let context = format!("{}[{index}]", rewards.field_context("items"));
            let item = REWARD_ITEM.check_in(context, raw)?;
            let item_id = item.str("item_id")?;
            self.check_item(item_id, item.context())?;
            items.push(QuestRewardItemDef {
                item_id: item_id.to_string(),
                quantity: item.positive_or("quantity", 1)?,
            });
        }

        let mut set_flags = Vec::new();
        if let Some(flags) = rewards.opt_object("set_flags")? {
            for (flag, value) in flags {
                let context = format!("{} {flag}", rewards.field_context("set_flags"));
                set_flags.push((flag.clone(), require_bool(value, &context)?));
            }
        }

        Ok(QuestRewardDef {
            gold: rewards.u32_or("gold", 0)?,
            party_exp: rewards.u32_or("party_exp", 0)?,
            items,
            set_flags,
        })
    }
}

impl DefinitionTable for QuestTable {
    type Def = QuestDef;
    const FILE: &'static str = "quests.json";
    const KIND: &'static str = "quest";

    fn build(&self, raw: Value) -> Result<IndexMap<String, QuestDef>> {
        let quests_raw = require_mapping(&raw, Self::FILE)?
            .get("quests")
            .ok_or_else(|| ContentError::validation("quests.json quests", "is required"))?;

        let mut quests = IndexMap::new();
        for (id, payload) in id_mapping(quests_raw, "quests.json quests")? {
            let entry = SCHEMA.check(id, payload)?;
            let quest_id = entry.str("quest_id")?;
            if quest_id != id {
                return Err(ContentError::validation(
                    entry.field_context("quest_id"),
                    format!("must match its key, got '{quest_id}'"),
                ));
            }

            let quest = QuestDef {
                quest_id: id.to_string(),
                name: entry.str("name")?.to_string(),
                prereqs: self.prereqs(&entry)?,
                objectives: self.objectives(&entry)?,
                turn_in: self.turn_in(&entry)?,
                rewards: self.rewards(&entry)?,
                accept_flags: entry.str_list("accept_flags")?,
                complete_flags: entry.str_list("complete_flags")?,
            };
            quests.insert(id.to_string(), quest);
        }
        Ok(quests)
    }
}

pub type QuestsRepository = Repository<QuestTable>;

impl Repository<QuestTable> {
    pub fn new(
        definitions_dir: impl Into<PathBuf>,
        items: Arc<ItemsRepository>,
        locations: Arc<LocationsRepository>,
        story: Arc<StoryRepository>,
    ) -> Self {
        Self::with_table(QuestTable::new(items, locations, story), definitions_dir)
    }
}
