// Key-value stores backing the search cache.
// A filesystem store for normal runs and an in-memory store with an optional quota.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::Result;

use super::paths;

/// String key to string value storage with no built-in expiry.
pub trait KvStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the platform cache directory.
    pub fn open_default() -> Option<Self> {
        paths::search_cache_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(paths::entry_file_name(key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        // Write atomically via temp file
        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store. Lives only as long as the process.
///
/// Test builds can cap its size to simulate a full store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    #[cfg(test)]
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys plus values exceed `bytes`.
    #[cfg(test)]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    #[cfg(test)]
    fn check_quota(
        &self,
        entries: &HashMap<String, String>,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let Some(quota) = self.quota else {
            return Ok(());
        };
        let used: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        if used + key.len() + value.len() > quota {
            return Err(crate::error::NavError::QuotaExceeded { used, quota });
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        #[cfg(test)]
        self.check_quota(&entries, key, value)?;

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("search"));

        store.set("github_llm_stars_desc_1_24", "{\"a\":1}").unwrap();
        assert_eq!(
            store.get("github_llm_stars_desc_1_24").unwrap(),
            Some("{\"a\":1}".to_string())
        );

        store.set("github_llm_stars_desc_1_24", "{\"a\":2}").unwrap();
        assert_eq!(
            store.get("github_llm_stars_desc_1_24").unwrap(),
            Some("{\"a\":2}".to_string())
        );

        store.remove("github_llm_stars_desc_1_24").unwrap();
        assert_eq!(store.get("github_llm_stars_desc_1_24").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(store.get("nothing").unwrap(), None);
        store.remove("nothing").unwrap();
    }

    #[test]
    fn test_file_store_keys_with_separators() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("github_a/b_stars_desc_1_24", "slash").unwrap();
        store.set("github_a_b_stars_desc_1_24", "underscore").unwrap();

        assert_eq!(
            store.get("github_a/b_stars_desc_1_24").unwrap().as_deref(),
            Some("slash")
        );
        assert_eq!(
            store.get("github_a_b_stars_desc_1_24").unwrap().as_deref(),
            Some("underscore")
        );
    }

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::with_quota(10);

        store.set("k", "12345").unwrap();
        // Replacing a key does not count its old value
        store.set("k", "123456789").unwrap();

        let err = store.set("k2", "x").unwrap_err();
        assert!(matches!(err, NavError::QuotaExceeded { quota: 10, .. }));
        assert_eq!(store.len(), 1);
    }
}
