//! Key-value stores that can persist small settings, such as the theme flag

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// A key-value store backed by a JSON file.
///
/// The whole file is read when the store is opened, and rewritten on every [`set`](KeyValueStore::set).
#[derive(Debug)]
pub struct FileKvStore {
    backing_file: PathBuf,
    values: HashMap<String, String>,
}

impl FileKvStore {
    /// Open the store at `path`. A missing file is an empty store, that will be created on the first write
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let values = match std::fs::File::open(path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {:?} yet", path);
                HashMap::new()
            },
            Err(err) => return Err(err.into()),
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.backing_file
    }

    fn save_to_file(&self) -> Result<(), StorageError> {
        let file = std::fs::File::create(&self.backing_file)?;
        serde_json::to_writer_pretty(file, &self.values)?;
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }
}


/// A key-value store that lives in memory only
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    values: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = FileKvStore::open(&path).unwrap();
        assert_eq!(store.get("darkMode").unwrap(), None);
        store.set("darkMode", "true").unwrap();

        let reopened = FileKvStore::open(&path).unwrap();
        assert_eq!(reopened.get("darkMode").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        match FileKvStore::open(&path) {
            Err(StorageError::Serialization(_)) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryKvStore::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.get("other").unwrap(), None);
    }
}
