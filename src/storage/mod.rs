pub mod memory;
pub mod postgres;

pub use memory::InMemoryKvStore;
pub use postgres::PostgresKvStore;

use async_trait::async_trait;

use crate::shared::AppError;

/// A stored value together with its write version.
///
/// Versions increase monotonically per key and back the optimistic
/// concurrency used by every read-modify-write update in the service.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedValue {
    pub value: String,
    pub version: u64,
}

/// Pluggable key-value backend.
///
/// The only shared mutable resource in the service; all player and
/// leaderboard updates go through `conditional_put` so that concurrent
/// submissions for the same key cannot silently drop a write.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>, AppError>;

    /// Unconditional write (last writer wins). Used only for records that
    /// are immutable once stored.
    async fn put(&self, key: &str, value: String) -> Result<(), AppError>;

    /// Writes only if the key's current version matches `expected_version`
    /// (`None` = the key must not exist yet). Returns false on conflict.
    async fn conditional_put(
        &self,
        key: &str,
        value: String,
        expected_version: Option<u64>,
    ) -> Result<bool, AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;

    /// Lists all keys starting with `prefix`. Used by the retention
    /// cleanup task to enumerate leaderboard lists.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Decodes a stored JSON record, mapping corruption to a storage error
pub fn decode_json<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Result<T, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::Storage(format!("corrupt record at {}: {}", key, e)))
}

/// Encodes a record for storage
pub fn encode_json<T: serde::Serialize>(key: &str, value: &T) -> Result<String, AppError> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Storage(format!("unencodable record at {}: {}", key, e)))
}
