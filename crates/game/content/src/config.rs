//! Content configuration read from the process environment.

use std::env;
use std::path::PathBuf;

use crate::paths::{BUNDLE_DIR_ENV, Deployment, resolve_definitions_dir};

/// Environment variable holding an explicit definitions directory.
pub const DEFINITIONS_DIR_ENV: &str = "GAME_DEFINITIONS_DIR";

/// Where definition files are read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentConfig {
    pub definitions_dir: Option<PathBuf>,
    pub deployment: Deployment,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            definitions_dir: None,
            deployment: Deployment::Source,
        }
    }
}

impl ContentConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_DEFINITIONS_DIR` - Definitions directory, used verbatim (default: unset)
    /// - `GAME_BUNDLE_DIR` - Root of a packaged install (default: run from source)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            definitions_dir: non_empty(DEFINITIONS_DIR_ENV).map(PathBuf::from),
            deployment: Deployment::from_bundle_root(non_empty(BUNDLE_DIR_ENV).map(PathBuf::from)),
        }
    }

    pub fn with_definitions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.definitions_dir = Some(dir.into());
        self
    }

    pub fn resolve_dir(&self) -> PathBuf {
        resolve_definitions_dir(self.definitions_dir.as_deref(), &self.deployment)
    }
}
