//! Summon definitions.

/// Per-bond-point stat multipliers. All zero when a summon does not scale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondScaling {
    pub hp_per_bond: f64,
    pub atk_per_bond: f64,
    pub def_per_bond: f64,
    pub init_per_bond: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummonDef {
    pub id: String,
    pub name: String,
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Bond points consumed to bring the summon into battle. Always positive.
    pub bond_cost: u32,
    pub tags: Vec<String>,
    pub bond_scaling: BondScaling,
}
