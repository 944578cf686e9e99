use super::{CacheResult, KeyValueStore};
use crate::logging::log_cache_operation;
use std::sync::Arc;
use std::time::Duration;

/// Thin TTL cache over a [`KeyValueStore`] that namespaces every key with a prefix
#[derive(Debug, Clone)]
pub struct KeyValueCache {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl KeyValueCache {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `{prefix}:{key}`, or `key` unchanged when no prefix is configured
    pub fn build_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{key}", self.prefix)
        }
    }

    pub async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let full_key = self.build_key(key);
        let value = self.store.get(&full_key).await?;
        log_cache_operation(
            "get",
            &full_key,
            if value.is_some() { "hit" } else { "miss" },
            None,
        );
        Ok(value)
    }

    /// Remaining lifetime alongside the value, as the store reports it
    pub async fn get_with_ttl(
        &self,
        key: &str,
    ) -> CacheResult<(Option<Duration>, Option<Vec<u8>>)> {
        let full_key = self.build_key(key);
        let (ttl, value) = self.store.get_with_ttl(&full_key).await?;
        log_cache_operation(
            "get_with_ttl",
            &full_key,
            if value.is_some() { "hit" } else { "miss" },
            ttl.map(|ttl| ttl.as_secs()),
        );
        Ok((ttl, value))
    }

    pub async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> CacheResult<()> {
        let full_key = self.build_key(key);
        self.store.set(&full_key, value, ttl).await?;
        log_cache_operation("set", &full_key, "stored", ttl.map(|ttl| ttl.as_secs()));
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> CacheResult<u64> {
        self.store.delete(&self.build_key(key)).await
    }

    /// Remove every key under this cache's prefix matching `pattern`
    pub async fn clear(&self, pattern: &str) -> CacheResult<u64> {
        let full_pattern = self.build_key(pattern);
        let removed = self.store.clear(&full_pattern).await?;
        log_cache_operation("clear", &full_pattern, "cleared", None);
        Ok(removed)
    }
}
