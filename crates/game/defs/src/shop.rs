//! Shop definitions.

/// Which table a shop's stock ids point into.
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
pub enum ShopType {
    Item,
    Weapon,
    Armour,
}

impl ShopType {
    pub const NAMES: [&'static str; 3] = ["item", "weapon", "armour"];
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopStockEntryDef {
    pub id: String,
    pub qty: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopDef {
    pub id: String,
    pub name: String,
    pub shop_type: ShopType,
    pub tags: Vec<String>,
    /// Candidate stock; ids are unique within a shop.
    pub stock_pool: Vec<ShopStockEntryDef>,
    /// Number of entries offered at once.
    pub stock_size: u32,
}
