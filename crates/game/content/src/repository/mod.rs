//! Generic lazily-loaded definition repository.
//!
//! A [`Repository`] owns one definition file. The first accessor call reads
//! and validates the whole file through its [`DefinitionTable`]; later calls
//! are served from the cache. A failed load caches nothing, so the next call
//! retries from disk.

pub mod fields;
pub mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ContentError, Result};
use crate::source::read_json;

/// How one definition file becomes a set of validated records.
pub trait DefinitionTable: Send + Sync {
    type Def: Send + Sync;

    /// Path of the file relative to the definitions directory.
    const FILE: &'static str;

    /// Entity name used in lookup errors and logs.
    const KIND: &'static str;

    /// Reads the raw document. Tables spread over several files override this.
    fn read(&self, path: &Path) -> Result<Value> {
        read_json(path)
    }

    /// Validates every entry of `raw`. One bad entry fails the whole table.
    fn build(&self, raw: Value) -> Result<IndexMap<String, Self::Def>>;
}

pub struct Repository<T: DefinitionTable> {
    table: T,
    definitions_dir: PathBuf,
    cache: OnceLock<IndexMap<String, T::Def>>,
    init: Mutex<()>,
}

impl<T: DefinitionTable> Repository<T> {
    pub fn with_table(table: T, definitions_dir: impl Into<PathBuf>) -> Self {
        Self {
            table,
            definitions_dir: definitions_dir.into(),
            cache: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn definitions_dir(&self) -> &Path {
        &self.definitions_dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.definitions_dir.join(T::FILE)
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Loads the file on first use. Concurrent first callers block until the
    /// single build finishes; none of them builds twice.
    pub fn ensure_loaded(&self) -> Result<&IndexMap<String, T::Def>> {
        if let Some(cache) = self.cache.get() {
            return Ok(cache);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cache) = self.cache.get() {
            return Ok(cache);
        }

        let path = self.file_path();
        let definitions = self
            .table
            .read(&path)
            .and_then(|raw| self.table.build(raw))
            .inspect_err(|e| warn!("Failed to load {} definitions: {}", T::KIND, e))?;
        debug!(
            "Loaded {} {} definitions from {}",
            definitions.len(),
            T::KIND,
            path.display()
        );
        Ok(self.cache.get_or_init(|| definitions))
    }

    pub fn get(&self, id: &str) -> Result<&T::Def> {
        self.ensure_loaded()?
            .get(id)
            .ok_or_else(|| ContentError::not_found(T::KIND, id))
    }

    /// Every record, in file order.
    pub fn all(&self) -> Result<Vec<&T::Def>> {
        Ok(self.ensure_loaded()?.values().collect())
    }

    pub fn ids(&self) -> Result<Vec<&str>> {
        Ok(self.ensure_loaded()?.keys().map(String::as_str).collect())
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.ensure_loaded()?.contains_key(id))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.ensure_loaded()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.ensure_loaded()?.is_empty())
    }
}

impl<T: DefinitionTable> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("kind", &T::KIND)
            .field("file", &self.file_path())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Iterates the entries of a top-level `{id: payload}` document.
pub(crate) fn id_mapping<'a>(
    raw: &'a Value,
    file: &str,
) -> Result<impl Iterator<Item = (&'a str, &'a Value)> + use<'a>> {
    let map = fields::require_mapping(raw, file)?;
    Ok(map.iter().map(|(id, payload)| (id.as_str(), payload)))
}

/// Fails when `id` is already a key of `defs`.
pub(crate) fn reject_duplicate<D>(defs: &IndexMap<String, D>, kind: &str, id: &str) -> Result<()> {
    if defs.contains_key(id) {
        return Err(ContentError::validation(
            format!("{kind} '{id}'"),
            "is defined more than once",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Maps each id to its payload's `n`, counting builds.
    #[derive(Default)]
    struct CountingTable {
        builds: AtomicUsize,
    }

    impl DefinitionTable for CountingTable {
        type Def = u64;
        const FILE: &'static str = "numbers.json";
        const KIND: &'static str = "number";

        fn build(&self, raw: Value) -> Result<IndexMap<String, u64>> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            id_mapping(&raw, Self::FILE)?
                .map(|(id, payload)| {
                    let n = fields::require_int(&payload["n"], id)?;
                    Ok((id.to_string(), n as u64))
                })
                .collect()
        }
    }

    fn write(dir: &Path, body: &str) {
        std::fs::write(dir.join("numbers.json"), body).unwrap();
    }

    #[test]
    fn loads_lazily_and_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), r#"{"zeta": {"n": 1}, "alpha": {"n": 2}, "mid": {"n": 3}}"#);
        let repo = Repository::with_table(CountingTable::default(), dir.path());

        assert!(!repo.is_loaded());
        assert_eq!(*repo.get("alpha").unwrap(), 2);
        assert!(repo.is_loaded());
        assert_eq!(repo.ids().unwrap(), ["zeta", "alpha", "mid"]);
        assert_eq!(repo.all().unwrap(), [&1u64, &2, &3]);
        assert_eq!(repo.len().unwrap(), 3);
    }

    #[test]
    fn miss_is_not_found_and_does_not_reload() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), r#"{"a": {"n": 1}}"#);
        let repo = Repository::with_table(CountingTable::default(), dir.path());

        let err = repo.get("b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "number 'b' not found");
        assert!(!repo.contains("b").unwrap());
        assert_eq!(repo.table().builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cache_survives_file_removal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), r#"{"a": {"n": 1}}"#);
        let repo = Repository::with_table(CountingTable::default(), dir.path());
        let first: Vec<u64> = repo.all().unwrap().into_iter().copied().collect();

        std::fs::remove_file(repo.file_path()).unwrap();
        let second: Vec<u64> = repo.all().unwrap().into_iter().copied().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), r#"{"a": {"n": "one"}}"#);
        let repo = Repository::with_table(CountingTable::default(), dir.path());

        assert_eq!(repo.get("a").unwrap_err().kind(), ErrorKind::Validation);
        assert!(!repo.is_loaded());

        write(dir.path(), r#"{"a": {"n": 1}}"#);
        assert_eq!(*repo.get("a").unwrap(), 1);
        assert_eq!(repo.table().builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), r#"{"a": {"n": 7}}"#);
        let repo = Arc::new(Repository::with_table(CountingTable::default(), dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || *repo.get("a").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
        assert_eq!(repo.table().builds.load(Ordering::SeqCst), 1);
    }
}
