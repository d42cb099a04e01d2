//! Story graph nodes.

use serde_json::{Map, Value};

/// An effect attached to a node or choice. `data` holds every key of the
/// effect object except `type`; its meaning belongs to the story runtime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryEffectDef {
    pub effect_type: String,
    pub data: Map<String, Value>,
}

impl StoryEffectDef {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryChoiceDef {
    pub label: String,
    pub next_node_id: String,
    pub effects: Vec<StoryEffectDef>,
}

/// A node either auto-advances through `next_node_id`, branches through
/// `choices`, or ends the scene when both are empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryNodeDef {
    pub id: String,
    pub text: String,
    pub effects: Vec<StoryEffectDef>,
    pub choices: Vec<StoryChoiceDef>,
    pub next_node_id: Option<String>,
}

impl StoryNodeDef {
    pub fn is_terminal(&self) -> bool {
        self.next_node_id.is_none() && self.choices.is_empty()
    }

    /// Every node id this node can lead to.
    pub fn successors(&self) -> impl Iterator<Item = &str> {
        self.next_node_id
            .as_deref()
            .into_iter()
            .chain(self.choices.iter().map(|choice| choice.next_node_id.as_str()))
    }
}
