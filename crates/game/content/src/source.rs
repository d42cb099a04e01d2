//! JSON source reader.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ContentError, Result};

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ContentError::load(path, e))
}

/// Reads `path` as UTF-8 and parses it as JSON.
///
/// Any failure (missing file, unreadable file, invalid UTF-8, malformed JSON)
/// becomes [`ContentError::Load`]; nothing is returned for a partial read.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = read_file(path)?;
    let value = serde_json::from_str(&content).map_err(|e| ContentError::load(path, e))?;
    debug!("Read {} bytes of JSON from {}", content.len(), path.display());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, LoadCause};

    #[test]
    fn reads_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weapons.json");
        std::fs::write(&path, r#"{"a": {"b": 1}}"#).unwrap();

        let value = read_json(&path).unwrap();
        assert_eq!(value["a"]["b"], 1);
    }

    #[test]
    fn missing_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(matches!(
            err,
            ContentError::Load {
                source: LoadCause::NotFound,
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_load_failure_with_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\n  \"a\": [1, 2,\n}").unwrap();

        match read_json(&path).unwrap_err() {
            ContentError::Load {
                path: failed,
                source: LoadCause::Json(json),
            } => {
                assert_eq!(failed, path);
                assert_eq!(json.line(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_utf8_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert_eq!(read_json(&path).unwrap_err().kind(), ErrorKind::Load);
    }
}
