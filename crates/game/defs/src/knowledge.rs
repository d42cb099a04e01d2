//! Battle knowledge: what party members know about enemies, and the global
//! rules that turn kill counts into knowledge tiers.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Knowledge tier, `0` (nothing known) through `3`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnowledgeTier {
    #[strum(serialize = "0")]
    Tier0,
    #[strum(serialize = "1")]
    Tier1,
    #[strum(serialize = "2")]
    Tier2,
    #[strum(serialize = "3")]
    Tier3,
}

impl KnowledgeTier {
    pub const ALL: [KnowledgeTier; 4] = [Self::Tier0, Self::Tier1, Self::Tier2, Self::Tier3];

    pub fn level(self) -> u8 {
        self as u8
    }
}

/// How an enemy's HP is shown to the player at a given tier.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HpVisibility {
    Hidden,
    StaticRange,
    Realtime,
}

impl HpVisibility {
    pub const NAMES: [&'static str; 3] = ["HIDDEN", "STATIC_RANGE", "REALTIME"];
}

/// Kill counts needed to reach tiers 1 to 3. Non-decreasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeThresholds {
    pub tier1_kills: u32,
    pub tier2_kills: u32,
    pub tier3_kills: u32,
}

impl KnowledgeThresholds {
    /// Highest tier reached with `kills` recorded kills.
    pub fn tier_for(&self, kills: u32) -> KnowledgeTier {
        if kills >= self.tier3_kills {
            KnowledgeTier::Tier3
        } else if kills >= self.tier2_kills {
            KnowledgeTier::Tier2
        } else if kills >= self.tier1_kills {
            KnowledgeTier::Tier1
        } else {
            KnowledgeTier::Tier0
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeRules {
    pub thresholds: KnowledgeThresholds,
    /// Holds every tier, in tier order.
    pub hp_visibility_by_tier: IndexMap<KnowledgeTier, HpVisibility>,
    /// Per-enemy overrides, kept opaque for the knowledge runtime.
    pub overrides: IndexMap<String, Map<String, Value>>,
}

impl KnowledgeRules {
    pub fn hp_visibility(&self, tier: KnowledgeTier) -> HpVisibility {
        self.hp_visibility_by_tier
            .get(&tier)
            .copied()
            .unwrap_or(HpVisibility::Hidden)
    }
}

/// One thing a party member knows about enemies matching `enemy_tags`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeEntry {
    pub enemy_tags: Vec<String>,
    /// Enemies above this level are not covered.
    pub max_level: Option<u32>,
    /// Inclusive `(low, high)` with `low <= high`.
    pub hp_range: Option<(u32, u32)>,
    pub speed_hint: Option<String>,
    pub behavior: Option<String>,
}
