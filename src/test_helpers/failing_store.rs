//! Key-value store double that counts traffic and fails on demand.

use crate::cache::{CacheError, CacheResult, InMemoryKeyValueStore, KeyValueStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct FailingKeyValueStore {
    inner: InMemoryKeyValueStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
    last_ttl: Mutex<Option<Duration>>,
}

impl FailingKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Expiry passed to the most recent successful write
    pub fn last_ttl(&self) -> Option<Duration> {
        *self.last_ttl.lock()
    }

    /// Backing store, for seeding raw entries without touching the counters
    pub fn inner(&self) -> &InMemoryKeyValueStore {
        &self.inner
    }
}

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::connection("injected read failure"));
        }
        self.inner.get(key).await
    }

    async fn get_with_ttl(&self, key: &str) -> CacheResult<(Option<Duration>, Option<Vec<u8>>)> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::connection("injected read failure"));
        }
        self.inner.get_with_ttl(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> CacheResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::operation("set", "injected write failure"));
        }
        self.inner.set(key, value, ttl).await?;
        *self.last_ttl.lock() = ttl;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<u64> {
        self.inner.delete(key).await
    }

    async fn clear(&self, pattern: &str) -> CacheResult<u64> {
        self.inner.clear(pattern).await
    }
}
