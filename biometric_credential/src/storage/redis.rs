use async_trait::async_trait;
use redis::{self, AsyncCommands};

use super::errors::StorageError;
use super::types::{KeyValueStore, RedisKeyValueStore};

const STORE_NAMESPACE: &str = "biometric";

impl RedisKeyValueStore {
    pub fn new(url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)?;
        tracing::info!("Creating new Redis key-value store");
        Ok(Self { client })
    }

    fn make_key(key: &str) -> String {
        format!("{STORE_NAMESPACE}:{key}")
    }

    fn strip_key(namespaced: &str) -> Option<&str> {
        namespaced
            .strip_prefix(STORE_NAMESPACE)
            .and_then(|rest| rest.strip_prefix(':'))
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn init(&self) -> Result<(), StorageError> {
        // Verify the connection works
        let _conn = self.client.get_multiplexed_async_connection().await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(key);
        let value: Option<String> = conn.get(&key).await?;
        Ok(value)
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(key);
        let _: () = conn.set(&key, value).await?;
        Ok(())
    }

    async fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(key);
        let _: () = conn.del(&key).await?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let namespaced: Vec<String> = conn.keys(format!("{STORE_NAMESPACE}:*")).await?;
        let mut keys: Vec<String> = namespaced
            .iter()
            .filter_map(|k| Self::strip_key(k))
            .map(str::to_string)
            .collect();
        keys.sort();
        Ok(keys)
    }
}
