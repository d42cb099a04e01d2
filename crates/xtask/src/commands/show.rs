//! Print one definition record
//!
//! Records are printed after validation, so what is shown is exactly what the
//! game would receive.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;
use std::fmt::Debug;
use std::path::PathBuf;

use game_content::ContentLibrary;

use crate::utils::{ContentKind, open_library};

/// Print one definition record
#[derive(Parser)]
pub struct Show {
    /// Kind of definition to show
    #[arg(value_enum, value_name = "KIND")]
    kind: ContentKind,

    /// Definition id (party member id for `knowledge`, `rules` for `knowledge-rules`)
    #[arg(value_name = "ID")]
    id: String,

    /// Definitions directory (defaults to GAME_DEFINITIONS_DIR or data/definitions)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "debug")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Pretty-printed debug format
    Debug,
    /// Pretty-printed JSON
    Json,
}

impl Show {
    pub fn execute(self) -> Result<()> {
        let library = open_library(self.dir.clone());
        println!(
            "{} {:?} '{}'",
            style("Definition:").bold().cyan(),
            self.kind,
            self.id
        );
        println!();
        self.print_record(&library)
            .with_context(|| format!("Failed to show {:?} '{}'", self.kind, self.id))
    }

    fn print_record(&self, library: &ContentLibrary) -> Result<()> {
        let id = self.id.as_str();
        match self.kind {
            ContentKind::Weapon => self.render(library.weapons().get(id)?),
            ContentKind::Armour => self.render(library.armour().get(id)?),
            ContentKind::Item => self.render(library.items().get(id)?),
            ContentKind::Skill => self.render(library.skills().get(id)?),
            ContentKind::Summon => self.render(library.summons().get(id)?),
            ContentKind::Enemy => self.render(library.enemies().get(id)?),
            ContentKind::EnemyGroup => self.render(library.enemies().get_group(id)?),
            ContentKind::Class => self.render(library.classes().get(id)?),
            ContentKind::PartyMember => self.render(library.party_members().get(id)?),
            ContentKind::StoryNode => self.render(library.story().get(id)?),
            ContentKind::Area => self.render(library.areas().get(id)?),
            ContentKind::Floor => self.render(library.floors().get(id)?),
            ContentKind::Location => self.render(library.locations().get(id)?),
            ContentKind::Quest => self.render(library.quests().get(id)?),
            ContentKind::Shop => self.render(library.shops().get(id)?),
            ContentKind::LootTable => self.render(library.loot_tables().get(id)?),
            ContentKind::Knowledge => self.render(&library.knowledge().entries_for(id)?),
            ContentKind::KnowledgeRules => self.render(library.knowledge_rules().get(id)?),
        }
    }

    fn render<T: Serialize + Debug + ?Sized>(&self, record: &T) -> Result<()> {
        match self.format {
            OutputFormat::Debug => println!("{record:#?}"),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(record)
                    .context("Failed to serialize definition to JSON")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
