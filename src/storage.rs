//! File storage backend.
//!
//! Provides persistent key-value storage for favorites and preferences,
//! backed by a single JSON object on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{ChocoError, ChocoResult};
use crate::platform::KeyValueStorage;

/// Name of the storage file inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

/// Key-value storage kept in a JSON file.
///
/// Data is cached in memory and written to disk on every modification. The
/// cache only changes once the write has succeeded.
pub struct FileStorage {
    /// Path to the storage file.
    path: PathBuf,
    /// In-memory cache of stored values.
    cache: Mutex<HashMap<String, Value>>,
}

impl FileStorage {
    /// Open the storage file in `data_dir`.
    ///
    /// A missing file starts out empty. An unreadable or corrupt file is an
    /// error rather than being silently replaced on the next write.
    pub fn open(data_dir: &Path) -> ChocoResult<Self> {
        let path = data_dir.join(STORAGE_FILE);

        let cache = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = %path.display(), keys = cache.len(), "opened storage");
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove a key. Returns whether it existed.
    pub fn remove(&self, key: &str) -> ChocoResult<bool> {
        let mut cache = self.cache.lock();
        if !cache.contains_key(key) {
            return Ok(false);
        }

        let mut next = cache.clone();
        next.remove(key);
        self.flush(&next)?;
        *cache = next;
        Ok(true)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.cache.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn flush(&self, cache: &HashMap<String, Value>) -> ChocoResult<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ChocoError::Storage(format!(
                    "Failed to create storage directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(cache)?;
        fs::write(&self.path, contents).map_err(|e| {
            ChocoError::Storage(format!(
                "Failed to write storage {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> ChocoResult<Option<Value>> {
        Ok(self.cache.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> ChocoResult<()> {
        let mut cache = self.cache.lock();
        let mut next = cache.clone();
        next.insert(key.to_string(), value);
        self.flush(&next)?;
        *cache = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_storage_basic_operations() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        assert_eq!(storage.get("key1").await.unwrap(), None);

        storage.set("key1", json!("value1")).await.unwrap();
        assert_eq!(storage.get("key1").await.unwrap(), Some(json!("value1")));

        storage.set("key1", json!(["a", "b"])).await.unwrap();
        assert_eq!(storage.get("key1").await.unwrap(), Some(json!(["a", "b"])));

        assert!(storage.remove("key1").unwrap());
        assert!(!storage.remove("key1").unwrap());
        assert_eq!(storage.get("key1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_storage_persistence() {
        let temp_dir = TempDir::new().unwrap();

        {
            let storage = FileStorage::open(temp_dir.path()).unwrap();
            storage.set("favorites", json!([{"title": "A"}])).await.unwrap();
            storage.set("preferences", json!({})).await.unwrap();
        }

        let storage = FileStorage::open(temp_dir.path()).unwrap();
        assert_eq!(
            storage.get("favorites").await.unwrap(),
            Some(json!([{"title": "A"}]))
        );
        assert_eq!(storage.keys(), vec!["favorites", "preferences"]);
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let storage = FileStorage::open(&nested).unwrap();
        storage.set("k", json!(1)).await.unwrap();

        assert!(nested.join(STORAGE_FILE).exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        let storage = FileStorage::open(&blocker).unwrap();

        // The data directory path is taken by a plain file
        fs::write(&blocker, "").unwrap();

        let result = storage.set("k", json!(1)).await;
        assert!(matches!(result, Err(ChocoError::Storage(_))));
        assert_eq!(storage.get("k").await.unwrap(), None);
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_key() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let storage = FileStorage::open(&data_dir).unwrap();
        storage.set("k", json!(1)).await.unwrap();

        fs::remove_dir_all(&data_dir).unwrap();
        fs::write(&data_dir, "").unwrap();

        assert!(storage.remove("k").is_err());
        assert_eq!(storage.get("k").await.unwrap(), Some(json!(1)));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(STORAGE_FILE), "{ not json").unwrap();

        assert!(matches!(
            FileStorage::open(temp_dir.path()),
            Err(ChocoError::Serialization(_))
        ));
    }
}
