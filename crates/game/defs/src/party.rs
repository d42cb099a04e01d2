//! Recruitable party member definitions.

use indexmap::IndexMap;

use crate::class::StartingAttributes;
use crate::equipment::ArmourSlot;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMemberDef {
    pub id: String,
    pub name: String,
    pub base_hp: u32,
    pub base_mp: u32,
    pub speed: u32,
    pub starting_level: u32,
    pub weapon_ids: Vec<String>,
    /// Body armour, if the member starts with any.
    pub armour_id: Option<String>,
    pub armour_slots: IndexMap<ArmourSlot, String>,
    pub tags: Vec<String>,
    pub starting_attributes: StartingAttributes,
}
