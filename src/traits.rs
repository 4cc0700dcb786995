use async_trait::async_trait;

use crate::error::{NetworkError, StorageError};
use crate::item::{ItemId, NewTodo, TodoItem};

/// A source of to-do items, usually a remote server
#[async_trait]
pub trait TodoSource {
    /// Returns every item this source contains, in the order the source returns them
    async fn list(&self) -> Result<Vec<TodoItem>, NetworkError>;
    /// Ask the source to create an item. The source picks its ID
    async fn create(&mut self, item: &NewTodo) -> Result<(), NetworkError>;
    /// Ask the source to delete an item
    async fn delete(&mut self, id: &ItemId) -> Result<(), NetworkError>;
}

/// A small persistent string-to-string store, such as the device local storage
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing has ever been stored there
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
