use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{KvStore, VersionedValue};
use crate::shared::AppError;

/// In-memory implementation of KvStore for development and testing.
///
/// Implements real version checks so the optimistic-concurrency paths
/// behave the same as against a production backend.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: Arc<RwLock<HashMap<String, VersionedValue>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;
        let version = entries.get(key).map(|v| v.version + 1).unwrap_or(1);
        entries.insert(key.to_string(), VersionedValue { value, version });
        Ok(())
    }

    async fn conditional_put(
        &self,
        key: &str,
        value: String,
        expected_version: Option<u64>,
    ) -> Result<bool, AppError> {
        let mut entries = self.entries.write().await;
        let current_version = entries.get(key).map(|v| v.version);

        if current_version != expected_version {
            debug!(
                key = %key,
                ?expected_version,
                ?current_version,
                "Conditional put version conflict"
            );
            return Ok(false);
        }

        let version = current_version.map(|v| v + 1).unwrap_or(1);
        entries.insert(key.to_string(), VersionedValue { value, version });
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
