//! One [`DefinitionTable`](crate::repository::DefinitionTable) per definition
//! file, with a repository alias and constructor for each.
//!
//! Tables that reference other content hold `Arc`s of the repositories they
//! check against. Building such a table loads its dependencies first.

pub mod areas;
pub mod armour;
pub mod classes;
pub mod enemies;
pub mod floors;
pub mod items;
pub mod knowledge;
pub mod knowledge_rules;
mod loadout;
pub mod locations;
pub mod loot_tables;
pub mod party_members;
pub mod quests;
pub mod shops;
pub mod skills;
pub mod story;
pub mod summons;
pub mod weapons;

pub use areas::{AreaTable, AreasRepository};
pub use armour::{ArmourRepository, ArmourTable};
pub use classes::{ClassTable, ClassesRepository};
pub use enemies::{EnemiesRepository, EnemyTable};
pub use floors::{FloorTable, FloorsRepository};
pub use items::{ItemTable, ItemsRepository};
pub use knowledge::{KnowledgeRepository, KnowledgeTable};
pub use knowledge_rules::{KnowledgeRulesRepository, KnowledgeRulesTable};
pub use locations::{LocationTable, LocationsRepository};
pub use loot_tables::{LootTableTable, LootTablesRepository};
pub use party_members::{PartyMemberTable, PartyMembersRepository};
pub use quests::{QuestTable, QuestsRepository};
pub use shops::{ShopTable, ShopsRepository};
pub use skills::{SkillTable, SkillsRepository};
pub use story::{StoryRepository, StoryTable};
pub use summons::{SummonTable, SummonsRepository};
pub use weapons::{WeaponTable, WeaponsRepository};
