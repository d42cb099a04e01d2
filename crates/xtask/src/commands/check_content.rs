//! Validate every definition file
//!
//! Loads the whole content library and reports per-kind counts, or the first
//! failure with its error code.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use crate::utils::open_library;

/// Load and validate every definition file
#[derive(Parser)]
pub struct CheckContent {
    /// Definitions directory (defaults to GAME_DEFINITIONS_DIR or data/definitions)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let library = open_library(self.dir);
        println!(
            "{} {}",
            style("Definitions:").bold().cyan(),
            library.definitions_dir().display()
        );

        match library.validate_all() {
            Ok(summary) => {
                println!();
                println!("{summary}");
                println!();
                println!("{}", style("All content is valid").bold().green());
                Ok(())
            }
            Err(err) => {
                println!(
                    "{} [{}] {}",
                    style("Invalid content:").bold().red(),
                    err.error_code(),
                    err
                );
                anyhow::bail!("content validation failed ({})", err.kind().as_str())
            }
        }
    }
}
