//! Immutable definition records for static game content.
//!
//! `game-defs` is the validated output contract of the content pipeline:
//! every record here has already passed schema, value-domain and
//! cross-reference checks in `game-content`. Records hold no back-references
//! to the repository that produced them and are never mutated after loading.
//!
//! Enumerated value domains (armour slots, skill target modes, shop types, ...)
//! are plain enums with `strum` string conversions so loaders can parse them
//! from the snake_case spelling used in JSON files.
pub mod class;
pub mod enemy;
pub mod equipment;
pub mod item;
pub mod knowledge;
pub mod loot;
pub mod party;
pub mod quest;
pub mod shop;
pub mod skill;
pub mod story;
pub mod summon;
pub mod world;

pub use class::{ClassDef, StartingAttributes};
pub use enemy::{EnemyDef, EnemyEntry, EnemyGroupDef};
pub use equipment::{ArmourDef, ArmourSlot, WeaponDef};
pub use item::{ItemDef, ItemTargeting};
pub use knowledge::{
    HpVisibility, KnowledgeEntry, KnowledgeRules, KnowledgeThresholds, KnowledgeTier,
};
pub use loot::{LootDropDef, LootTableDef};
pub use party::PartyMemberDef;
pub use quest::{
    QuestDef, QuestObjective, QuestObjectiveDef, QuestPrereqDef, QuestRewardDef,
    QuestRewardItemDef, QuestTurnInDef,
};
pub use shop::{ShopDef, ShopStockEntryDef, ShopType};
pub use skill::{SkillDef, SkillEffectType, TargetMode};
pub use story::{StoryChoiceDef, StoryEffectDef, StoryNodeDef};
pub use summon::{BondScaling, SummonDef};
pub use world::{
    AreaConnectionDef, AreaDef, FloorDef, LocationConnectionDef, LocationDef, LocationType,
    NpcPresenceDef,
};
