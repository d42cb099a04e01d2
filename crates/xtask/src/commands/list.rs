//! List definition ids of one kind

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use game_content::ContentLibrary;

use crate::utils::{ContentKind, open_library};

/// List the ids of one definition kind
#[derive(Parser)]
pub struct List {
    /// Kind of definition to list
    #[arg(value_enum, value_name = "KIND")]
    kind: ContentKind,

    /// Definitions directory (defaults to GAME_DEFINITIONS_DIR or data/definitions)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let library = open_library(self.dir);
        let ids = ids_of(&library, self.kind)
            .with_context(|| format!("Failed to load {:?} definitions", self.kind))?;

        println!(
            "{} {:?} ({})",
            style("Kind:").bold().cyan(),
            self.kind,
            ids.len()
        );
        for id in ids {
            println!("  {id}");
        }
        Ok(())
    }
}

fn ids_of(library: &ContentLibrary, kind: ContentKind) -> game_content::Result<Vec<String>> {
    fn owned(ids: Vec<&str>) -> Vec<String> {
        ids.into_iter().map(str::to_string).collect()
    }

    Ok(match kind {
        ContentKind::Weapon => owned(library.weapons().ids()?),
        ContentKind::Armour => owned(library.armour().ids()?),
        ContentKind::Item => owned(library.items().ids()?),
        ContentKind::Skill => owned(library.skills().ids()?),
        ContentKind::Summon => owned(library.summons().ids()?),
        ContentKind::Enemy => library.enemies().all()?.iter().map(|e| e.id.clone()).collect(),
        ContentKind::EnemyGroup => library
            .enemies()
            .groups()?
            .iter()
            .map(|g| g.id.clone())
            .collect(),
        ContentKind::Class => owned(library.classes().ids()?),
        ContentKind::PartyMember => owned(library.party_members().ids()?),
        ContentKind::StoryNode => owned(library.story().ids()?),
        ContentKind::Area => owned(library.areas().ids()?),
        ContentKind::Floor => owned(library.floors().ids()?),
        ContentKind::Location => owned(library.locations().ids()?),
        ContentKind::Quest => owned(library.quests().ids()?),
        ContentKind::Shop => owned(library.shops().ids()?),
        ContentKind::LootTable => owned(library.loot_tables().ids()?),
        ContentKind::Knowledge => owned(library.knowledge().ids()?),
        ContentKind::KnowledgeRules => owned(library.knowledge_rules().ids()?),
    })
}
