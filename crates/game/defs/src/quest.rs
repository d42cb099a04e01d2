//! Quest definitions.
//!
//! Quests are plain data: flags gate acceptance, objectives describe what the
//! quest tracker counts, and rewards are granted on turn-in. Runtime quest
//! progress lives outside this crate.

/// Story flags that must (or must not) be set before a quest is offered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestPrereqDef {
    pub required_flags: Vec<String>,
    pub forbidden_flags: Vec<String>,
}

/// What an objective counts. Each kind carries only the target it uses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum QuestObjective {
    /// Defeat enemies carrying `tag`.
    KillTag { tag: String },
    /// Hold `item_id` in the inventory.
    CollectItem { item_id: String },
    /// Enter the location `area_id`.
    VisitArea { area_id: String },
}

impl QuestObjective {
    pub const TYPES: [&'static str; 3] = ["kill_tag", "collect_item", "visit_area"];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::KillTag { .. } => "kill_tag",
            Self::CollectItem { .. } => "collect_item",
            Self::VisitArea { .. } => "visit_area",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestObjectiveDef {
    pub objective: QuestObjective,
    pub label: String,
    /// Count required to complete the objective. Always positive.
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestTurnInDef {
    pub node_id: String,
    pub npc_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestRewardItemDef {
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestRewardDef {
    pub gold: u32,
    pub party_exp: u32,
    pub items: Vec<QuestRewardItemDef>,
    /// Flags written on turn-in, in authoring order.
    pub set_flags: Vec<(String, bool)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestDef {
    pub quest_id: String,
    pub name: String,
    pub prereqs: QuestPrereqDef,
    pub objectives: Vec<QuestObjectiveDef>,
    pub turn_in: Option<QuestTurnInDef>,
    pub rewards: QuestRewardDef,
    pub accept_flags: Vec<String>,
    pub complete_flags: Vec<String>,
}
