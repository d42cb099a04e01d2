//! Consumable and material item definitions.

/// Who an item may be used on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemTargeting {
    /// The user of the item.
    #[default]
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    User,
    Ally,
    Enemy,
}

impl ItemTargeting {
    pub const NAMES: [&'static str; 3] = ["self", "ally", "enemy"];
}

/// Item definition used by shops, quest rewards, loot and inventories.
///
/// Every numeric effect field is zero when the definition omits it, so
/// consumers can apply effects without checking for presence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    /// Free-form category (`consumable`, `material`, `key`, ...).
    pub kind: String,
    pub description: String,
    pub value: u32,
    pub targeting: ItemTargeting,
    pub heal_hp: u32,
    pub heal_mp: u32,
    pub restore_energy: u32,
    pub debuff_attack_flat: u32,
    pub debuff_defense_flat: u32,
}

impl ItemDef {
    /// Returns true if using the item restores any resource.
    pub fn is_restorative(&self) -> bool {
        self.heal_hp > 0 || self.heal_mp > 0 || self.restore_energy > 0
    }

    /// Returns true if the item applies a debuff to its target.
    pub fn is_debuff(&self) -> bool {
        self.debuff_attack_flat > 0 || self.debuff_defense_flat > 0
    }
}
