use async_trait::async_trait;
use std::collections::HashMap;

use super::errors::StorageError;

/// In-process store, the stand-in for browser local storage in tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    pub(super) entry: HashMap<String, String>,
}

/// Redis-backed store for deployments that want records to outlive the process.
pub struct RedisKeyValueStore {
    pub(super) client: redis::Client,
}

/// Local key-value storage the helper persists credential records in.
///
/// Keys and values are plain strings, mirroring the browser storage contract.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Get a value from the store.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Put a value into the store, replacing any existing value.
    async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove a value from the store. Removing a missing key is not an error.
    async fn delete(&mut self, key: &str) -> Result<(), StorageError>;

    /// List every key currently held by the store.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;
}
