//! Development tasks for the game content pipeline
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, List, Show};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Development tasks for game content
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Content tools for the game definitions", long_about = None)]
#[command(version)]
struct Cli {
    /// Log repository loads at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load and validate every definition file
    CheckContent(CheckContent),

    /// List the ids of one definition kind
    List(List),

    /// Print one definition record
    Show(Show),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for GAME_DEFINITIONS_DIR and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::CheckContent(cmd) => cmd.execute(),
        Command::List(cmd) => cmd.execute(),
        Command::Show(cmd) => cmd.execute(),
    }
}

/// Logs to stderr. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
