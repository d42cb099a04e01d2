//! Weapon-tag gated combat skills.

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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TargetMode {
    SingleEnemy,
    MultiEnemy,
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    User,
}

impl TargetMode {
    pub const NAMES: [&'static str; 3] = ["single_enemy", "multi_enemy", "self"];
}

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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SkillEffectType {
    Damage,
    Guard,
}

impl SkillEffectType {
    pub const NAMES: [&'static str; 2] = ["damage", "guard"];
}

/// A skill usable when the wielder's weapon carries one of
/// `required_weapon_tags` (checked by combat code, not at load time).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub required_weapon_tags: Vec<String>,
    pub target_mode: TargetMode,
    pub max_targets: u32,
    pub mp_cost: u32,
    pub base_power: u32,
    pub effect_type: SkillEffectType,
    pub gold_value: u32,
}
