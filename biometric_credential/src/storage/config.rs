use std::{env, sync::LazyLock};

use super::errors::StorageError;
use super::types::{InMemoryKeyValueStore, KeyValueStore, RedisKeyValueStore};

pub(crate) static BIOMETRIC_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("BIOMETRIC_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

pub(crate) static BIOMETRIC_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("BIOMETRIC_STORE_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
});

/// Builds and initializes the key-value store selected by `BIOMETRIC_STORE_TYPE`.
pub async fn store_from_env() -> Result<Box<dyn KeyValueStore>, StorageError> {
    build_store(BIOMETRIC_STORE_TYPE.as_str(), BIOMETRIC_STORE_URL.as_str()).await
}

async fn build_store(
    store_type: &str,
    store_url: &str,
) -> Result<Box<dyn KeyValueStore>, StorageError> {
    tracing::info!("Initializing key-value store with type: {}", store_type);

    let store: Box<dyn KeyValueStore> = match store_type {
        "memory" => Box::new(InMemoryKeyValueStore::new()),
        "redis" => Box::new(RedisKeyValueStore::new(store_url)?),
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    store.init().await.inspect_err(|e| {
        tracing::error!("Failed to initialize {} store: {}", store_type, e);
    })?;

    tracing::info!("Connected to key-value store: type={}", store_type);
    Ok(store)
}
