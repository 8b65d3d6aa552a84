use async_trait::async_trait;
use std::collections::HashMap;

use super::errors::StorageError;
use super::types::{InMemoryKeyValueStore, KeyValueStore};

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory key-value store");
        Self {
            entry: HashMap::new(),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entry.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entry.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.entry.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self.entry.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
