//! Weapon and armour definitions.

/// Equipment slot an armour piece occupies.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ArmourSlot {
    Head,
    Body,
    Hands,
    Boots,
}

impl ArmourSlot {
    /// Slot names accepted in definition files, in display order.
    pub const NAMES: [&'static str; 4] = ["head", "body", "hands", "boots"];
}

/// A weapon that classes, party members and loot can reference.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    pub attack: u32,
    pub value: u32,
    pub tags: Vec<String>,
    /// Number of weapon slots the weapon occupies (two-handed weapons use 2).
    pub slot_cost: u32,
    pub default_basic_attack_id: Option<String>,
    pub energy_bonus: i32,
}

impl WeaponDef {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An armour piece bound to a single [`ArmourSlot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmourDef {
    pub id: String,
    pub name: String,
    pub slot: ArmourSlot,
    pub defense: u32,
    pub value: u32,
    pub tags: Vec<String>,
    pub hp_bonus: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn slot_names_match_enum_spelling() {
        let parsed: Vec<ArmourSlot> = ArmourSlot::NAMES
            .iter()
            .map(|name| ArmourSlot::from_str(name).expect("known slot"))
            .collect();
        assert_eq!(parsed, ArmourSlot::iter().collect::<Vec<_>>());
        assert_eq!(ArmourSlot::Hands.to_string(), "hands");
    }

    #[test]
    fn slot_rejects_unknown_names() {
        assert!(ArmourSlot::from_str("cloak").is_err());
        assert!(ArmourSlot::from_str("Body").is_err());
    }
}
