//! Utility functions for xtask commands

use std::path::PathBuf;

use game_content::{ContentConfig, ContentLibrary};

/// Definition kinds addressable from the command line
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ContentKind {
    Weapon,
    Armour,
    Item,
    Skill,
    Summon,
    Enemy,
    EnemyGroup,
    Class,
    PartyMember,
    StoryNode,
    Area,
    Floor,
    Location,
    Quest,
    Shop,
    LootTable,
    Knowledge,
    KnowledgeRules,
}

/// Open the content library, preferring `dir` over the environment
pub fn open_library(dir: Option<PathBuf>) -> ContentLibrary {
    let mut config = ContentConfig::from_env();
    if let Some(dir) = dir {
        config = config.with_definitions_dir(dir);
    }
    ContentLibrary::from_config(&config)
}
