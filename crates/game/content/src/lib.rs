//! Loading and validation of static game definitions.
//!
//! This crate reads the JSON definition files under `data/definitions` and
//! turns them into the immutable records of `game-defs`:
//! - Equipment, items, skills and summons
//! - Enemies and enemy groups
//! - Playable classes and party members
//! - Story nodes, areas, floors and locations
//! - Quests, shops and loot tables
//! - Enemy knowledge and knowledge rules
//!
//! Each file is owned by a lazily-loaded [`Repository`]. The first lookup
//! reads and validates the whole file; one malformed entry fails the load and
//! nothing is cached. References between files (class weapons, quest items,
//! shop stock, ...) are checked at load time through the dependency
//! repositories a table is constructed with.
//!
//! [`ContentLibrary`] wires every repository over one directory.

pub mod config;
pub mod error;
pub mod library;
pub mod paths;
pub mod repository;
pub mod source;
pub mod tables;

pub use config::{ContentConfig, DEFINITIONS_DIR_ENV};
pub use error::{ContentError, ErrorKind, LoadCause, Result};
pub use library::{ContentLibrary, ContentSummary};
pub use paths::{BUNDLE_DIR_ENV, Deployment, resolve_definitions_dir};
pub use repository::{DefinitionTable, Repository};
pub use source::read_json;
pub use tables::*;

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use serde_json::Value;

    /// Writes `value` as pretty JSON to `dir/file`, creating parent directories.
    pub fn write_json(dir: &Path, file: &str, value: Value) {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }
}
