//! Enemy stat blocks and encounter groups.
//!
//! The enemy table mixes two shapes: standalone stat blocks and named
//! groups listing other enemy ids. [`EnemyEntry`] keeps the two apart so no
//! record carries fields that are meaningless for its shape.

use indexmap::IndexMap;

use crate::equipment::ArmourSlot;

/// A standalone enemy with its own combat stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub rewards_exp: u32,
    pub rewards_gold: u32,
    pub tags: Vec<String>,
    /// Key into the knowledge system when it differs from the enemy id.
    pub knowledge_key: Option<String>,
    /// Carried weapons; the first one sets the attack bonus.
    pub weapon_ids: Vec<String>,
    pub armour_slots: IndexMap<ArmourSlot, String>,
}

impl EnemyDef {
    pub fn armour_in(&self, slot: ArmourSlot) -> Option<&str> {
        self.armour_slots.get(&slot).map(String::as_str)
    }

    pub fn is_equipped(&self) -> bool {
        !self.weapon_ids.is_empty() || !self.armour_slots.is_empty()
    }
}

/// A named roster of enemies fought together.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyGroupDef {
    pub id: String,
    pub name: String,
    /// Member ids in encounter order; duplicates spawn several copies.
    pub enemy_ids: Vec<String>,
    pub tags: Vec<String>,
}

/// One entry of the enemy table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum EnemyEntry {
    Standalone(EnemyDef),
    Group(EnemyGroupDef),
}

impl EnemyEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Standalone(enemy) => &enemy.id,
            Self::Group(group) => &group.id,
        }
    }

    pub fn as_standalone(&self) -> Option<&EnemyDef> {
        match self {
            Self::Standalone(enemy) => Some(enemy),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&EnemyGroupDef> {
        match self {
            Self::Group(group) => Some(group),
            Self::Standalone(_) => None,
        }
    }
}
