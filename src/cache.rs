//! This module provides a local to-do store
//!
//! It behaves like the server (it assigns IDs on creation), so it can stand in for it when working offline, or in tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::item::{ItemId, NewTodo, TodoItem};
use crate::mock_behaviour::MockBehaviour;
use crate::traits::TodoSource;


/// A to-do source that stores its items in memory, and optionally in a local file
#[derive(Debug)]
pub struct Cache {
    backing_file: Option<PathBuf>,
    data: CachedData,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    items: Vec<TodoItem>,
    last_id: u64,
}

impl Cache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_file: Some(PathBuf::from(path)),
            data,
            mock_behaviour: None,
        })
    }

    /// Initialize an empty cache, that will be saved to `path`
    pub fn new(path: &Path) -> Self {
        Self{
            backing_file: Some(PathBuf::from(path)),
            data: CachedData::default(),
            mock_behaviour: None,
        }
    }

    /// Initialize an empty cache, that is never saved
    pub fn in_memory() -> Self {
        Self{
            backing_file: None,
            data: CachedData::default(),
            mock_behaviour: None,
        }
    }

    /// Make every further operation consult `mock_behaviour` first
    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    /// The items currently stored, without going through any mock behaviour
    pub fn items(&self) -> &[TodoItem] {
        &self.data.items
    }

    /// Store the current Cache to its backing file (if any)
    pub fn save_to_file(&self) {
        let path = match &self.backing_file {
            None => return,
            Some(path) => path,
        };
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.data) {
            log::warn!("Unable to serialize: {}", err);
        };
    }

    fn check_mock<F>(&self, check: F) -> Result<(), NetworkError>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), NetworkError>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => {
                let mut behaviour = match behaviour.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                check(&mut *behaviour)
            }
        }
    }
}

#[async_trait]
impl TodoSource for Cache {
    async fn list(&self) -> Result<Vec<TodoItem>, NetworkError> {
        self.check_mock(MockBehaviour::can_list)?;
        Ok(self.data.items.clone())
    }

    async fn create(&mut self, item: &NewTodo) -> Result<(), NetworkError> {
        self.check_mock(MockBehaviour::can_create)?;

        self.data.last_id += 1;
        let id = ItemId::from(self.data.last_id);
        log::debug!("Storing item {} in the cache", id);
        self.data.items.push(item.clone().into_item(id));
        self.save_to_file();
        Ok(())
    }

    async fn delete(&mut self, id: &ItemId) -> Result<(), NetworkError> {
        self.check_mock(MockBehaviour::can_delete)?;

        let position = self.data.items.iter().position(|item| item.id() == id)
            .ok_or_else(|| NetworkError::Unavailable(format!("No item {} in the cache", id)))?;
        self.data.items.remove(position);
        self.save_to_file();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serde_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");

        let mut cache = Cache::new(&cache_path);
        cache.create(&NewTodo::new("Buy milk", "2 bottles", "Home", "12/03/2025")).await.unwrap();
        cache.create(&NewTodo::new("Report", "Q1", "Work", "13/03/2025")).await.unwrap();

        let retrieved_cache = Cache::from_file(&cache_path).unwrap();
        assert_eq!(cache.data, retrieved_cache.data);
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let mut cache = Cache::in_memory();
        cache.create(&NewTodo::new("a", "a", "A", "d")).await.unwrap();
        cache.create(&NewTodo::new("b", "b", "B", "d")).await.unwrap();
        cache.delete(&ItemId::from("2")).await.unwrap();
        cache.create(&NewTodo::new("c", "c", "C", "d")).await.unwrap();

        let ids: Vec<&str> = cache.items().iter().map(|item| item.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn deleting_an_unknown_item_fails() {
        let mut cache = Cache::in_memory();
        assert!(cache.delete(&ItemId::from("42")).await.is_err());
    }

    #[tokio::test]
    async fn mocked_failures() {
        let mut cache = Cache::in_memory();
        let behaviour = Arc::new(Mutex::new(MockBehaviour::fail_now(1)));
        cache.set_mock_behaviour(Some(Arc::clone(&behaviour)));

        assert!(cache.create(&NewTodo::new("a", "a", "A", "d")).await.is_err());
        assert!(cache.items().is_empty());
        assert!(cache.create(&NewTodo::new("a", "a", "A", "d")).await.is_ok());
        assert!(cache.list().await.is_err());
        assert_eq!(cache.list().await.unwrap().len(), 1);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Cache::from_file(&dir.path().join("nope.json")).is_err());
    }
}
