//! In-process [`KeyValueStore`] with passive expiry.
//!
//! Expired entries are dropped when they are next touched or when a `clear` sweeps
//! over them. Expiry follows the tokio clock so paused-time tests can drive it.

use super::{CacheError, CacheResult, KeyValueStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: DashMap<String, Entry>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored entries, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn live_entry(&self, key: &str) -> Option<Entry> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                return Some(entry.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(self.live_entry(key).map(|entry| entry.value))
    }

    async fn get_with_ttl(&self, key: &str) -> CacheResult<(Option<Duration>, Option<Vec<u8>>)> {
        Ok(match self.live_entry(key) {
            Some(entry) => (entry.remaining(Instant::now()), Some(entry.value)),
            None => (None, None),
        })
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> CacheResult<()> {
        if ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(CacheError::operation("set", "expiry must be positive"));
        }
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<u64> {
        let now = Instant::now();
        Ok(match self.entries.remove(key) {
            Some((_, entry)) if !entry.is_expired(now) => 1,
            _ => 0,
        })
    }

    async fn clear(&self, pattern: &str) -> CacheResult<u64> {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|key, entry| {
            if !glob_match(pattern, key) {
                return true;
            }
            if !entry.is_expired(now) {
                removed += 1;
            }
            false
        });
        Ok(removed)
    }
}

/// Redis-style glob: `*` matches any run of characters, `?` exactly one
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
