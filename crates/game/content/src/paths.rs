//! Definitions directory resolution.

use std::path::{Path, PathBuf};

/// Environment variable naming the root of a packaged (bundled) install.
pub const BUNDLE_DIR_ENV: &str = "GAME_BUNDLE_DIR";

/// Location of the definitions directory relative to a deployment root.
pub const DEFINITIONS_SUBDIR: [&str; 2] = ["data", "definitions"];

/// How the game is being run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Deployment {
    /// Running from a source checkout; data lives in the workspace.
    Source,
    /// Running from an extracted bundle rooted at `bundle_root`.
    Packaged { bundle_root: PathBuf },
}

impl Deployment {
    /// Inspects the process environment once.
    pub fn detect() -> Self {
        Self::from_bundle_root(std::env::var_os(BUNDLE_DIR_ENV).map(PathBuf::from))
    }

    /// An empty bundle root counts as unset.
    pub fn from_bundle_root(bundle_root: Option<PathBuf>) -> Self {
        match bundle_root {
            Some(bundle_root) if !bundle_root.as_os_str().is_empty() => {
                Self::Packaged { bundle_root }
            }
            _ => Self::Source,
        }
    }
}

/// Root of the source checkout this crate was built from.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(3)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Computes the definitions directory. Never fails and never touches the disk.
///
/// Precedence: an explicit override is used verbatim; a packaged deployment
/// resolves under its bundle root; otherwise the workspace copy is used.
pub fn resolve_definitions_dir(override_dir: Option<&Path>, deployment: &Deployment) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    let root = match deployment {
        Deployment::Packaged { bundle_root } => bundle_root.clone(),
        Deployment::Source => workspace_root(),
    };
    DEFINITIONS_SUBDIR
        .iter()
        .fold(root, |path, part| path.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_verbatim() {
        let deployment = Deployment::Packaged {
            bundle_root: PathBuf::from("/opt/bundle"),
        };
        let dir = resolve_definitions_dir(Some(Path::new("relative/defs")), &deployment);
        assert_eq!(dir, PathBuf::from("relative/defs"));
    }

    #[test]
    fn packaged_resolves_under_bundle() {
        let deployment = Deployment::from_bundle_root(Some(PathBuf::from("bundle")));
        assert_eq!(
            resolve_definitions_dir(None, &deployment),
            Path::new("bundle").join("data").join("definitions")
        );
    }

    #[test]
    fn source_resolves_under_workspace() {
        let dir = resolve_definitions_dir(None, &Deployment::Source);
        assert!(dir.ends_with("data/definitions"));
        assert_eq!(dir.parent().and_then(Path::parent), Some(workspace_root().as_path()));
    }

    #[test]
    fn empty_bundle_root_is_source() {
        assert_eq!(
            Deployment::from_bundle_root(Some(PathBuf::new())),
            Deployment::Source
        );
        assert_eq!(Deployment::from_bundle_root(None), Deployment::Source);
    }
}
