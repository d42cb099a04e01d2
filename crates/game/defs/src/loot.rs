//! Loot tables matched against enemy tags.

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDropDef {
    pub item_id: String,
    /// Drop probability in `[0, 1]`.
    pub chance: f64,
    pub min_qty: u32,
    pub max_qty: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTableDef {
    pub id: String,
    pub required_tags: Vec<String>,
    pub forbidden_tags: Vec<String>,
    pub drops: Vec<LootDropDef>,
}

impl LootTableDef {
    /// Whether an enemy carrying `enemy_tags` rolls on this table: every
    /// required tag present and no forbidden tag present.
    pub fn applies_to<S: AsRef<str>>(&self, enemy_tags: &[S]) -> bool {
        let has = |tag: &String| enemy_tags.iter().any(|t| t.as_ref() == tag);
        self.required_tags.iter().all(has) && !self.forbidden_tags.iter().any(has)
    }
}
