use super::CacheResult;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Byte-oriented key-value store with optional per-key expiry.
///
/// Keys passed in are already namespaced; implementations store them verbatim.
#[async_trait]
pub trait KeyValueStore: fmt::Debug + Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Remaining time to live alongside the value; the TTL is `None` for keys
    /// without expiry and for missing keys
    async fn get_with_ttl(&self, key: &str) -> CacheResult<(Option<Duration>, Option<Vec<u8>>)>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> CacheResult<()>;

    /// Number of keys removed
    async fn delete(&self, key: &str) -> CacheResult<u64>;

    /// Remove every key matching a glob `pattern` (`*` and `?`), returning the count
    async fn clear(&self, pattern: &str) -> CacheResult<u64>;
}
