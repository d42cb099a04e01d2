//! Player class definitions.

use indexmap::IndexMap;

use crate::equipment::ArmourSlot;

/// Starting attribute spread (`STR`, `DEX`, `INT`, `VIT`, `BOND` in JSON).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartingAttributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub vitality: u32,
    pub bond: u32,
}

impl StartingAttributes {
    /// JSON keys in declaration order.
    pub const KEYS: [&'static str; 5] = ["STR", "DEX", "INT", "VIT", "BOND"];

    pub fn total(&self) -> u32 {
        self.strength + self.dexterity + self.intelligence + self.vitality + self.bond
    }
}

/// Starting stats and loadout for a playable class.
///
/// `starting_weapon_id` is always listed in `starting_weapons`, and
/// `starting_armour_id` is always the body slot of `starting_armour_slots`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub id: String,
    pub name: String,
    pub base_hp: u32,
    pub base_mp: u32,
    pub speed: u32,
    pub starting_level: u32,
    pub starting_weapon_id: String,
    pub starting_armour_id: String,
    pub starting_weapons: Vec<String>,
    pub starting_armour_slots: IndexMap<ArmourSlot, String>,
    /// Item id to quantity, in authoring order.
    pub starting_items: IndexMap<String, u32>,
    pub starting_abilities: Vec<String>,
    pub starting_attributes: StartingAttributes,
    /// Summons the class can equip from the start.
    pub known_summons: Vec<String>,
    /// Summons equipped at creation; repeats grant several copies.
    pub default_equipped_summons: Vec<String>,
}

impl ClassDef {
    pub fn armour_in(&self, slot: ArmourSlot) -> Option<&str> {
        self.starting_armour_slots.get(&slot).map(String::as_str)
    }
}
