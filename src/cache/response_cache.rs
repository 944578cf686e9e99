//! Whole-response memoization keyed by operation identity and arguments.

use super::KeyValueCache;
use crate::constants::components;
use crate::error::{ServiceError, ServiceResult};
use crate::logging::log_error;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Result of [`ResponseCache::cached`]
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResponse<T> {
    /// Stored body returned verbatim, never decoded
    Hit { payload: Vec<u8>, cache_control: String },
    /// Freshly computed value, already written to the cache
    Fresh { value: T, cache_control: String },
}

impl<T> CachedResponse<T> {
    pub fn cache_control(&self) -> &str {
        match self {
            CachedResponse::Hit { cache_control, .. }
            | CachedResponse::Fresh { cache_control, .. } => cache_control,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CachedResponse::Hit { .. })
    }
}

impl<T: Serialize> CachedResponse<T> {
    /// Encoded response body for either variant
    pub fn into_bytes(self) -> ServiceResult<Vec<u8>> {
        match self {
            CachedResponse::Hit { payload, .. } => Ok(payload),
            CachedResponse::Fresh { value, .. } => {
                serde_json::to_vec(&value).map_err(|e| ServiceError::encode(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    cache: KeyValueCache,
    ttl: Duration,
    namespace: String,
}

impl ResponseCache {
    pub fn new(cache: KeyValueCache, ttl: Duration, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            ttl,
            namespace: namespace.into(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn cache_control(max_age: Duration) -> String {
        format!("max-age={}", max_age.as_secs())
    }

    /// `{namespace}:{operation}:{sha256(operation:json(args))}`.
    ///
    /// `serde_json` maps keep their keys sorted, so logically equal arguments render
    /// to the same JSON and share a key.
    pub fn build_key<A: Serialize + ?Sized>(
        &self,
        operation: &str,
        args: &A,
    ) -> ServiceResult<String> {
        let normalized = serde_json::to_value(args)
            .map_err(|e| ServiceError::encode(e.to_string()))?
            .to_string();
        let digest = Sha256::digest(format!("{operation}:{normalized}").as_bytes());
        Ok(format!(
            "{}:{operation}:{}",
            self.namespace,
            hex::encode(digest)
        ))
    }

    /// Serve the stored response for `(operation, args)` or compute, store and return it.
    ///
    /// A hit advertises the entry's remaining lifetime as its `max-age`. A failed write
    /// is raised as [`ServiceError::CacheWrite`] carrying the computed value as JSON.
    pub async fn cached<A, T, F, Fut>(
        &self,
        operation: &str,
        args: &A,
        compute: F,
    ) -> ServiceResult<CachedResponse<T>>
    where
        A: Serialize + ?Sized,
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
    {
        let key = self.build_key(operation, args)?;

        if let (remaining, Some(payload)) = self.cache.get_with_ttl(&key).await? {
            let max_age = remaining.unwrap_or(self.ttl);
            debug!(
                operation,
                key = %key,
                max_age_secs = max_age.as_secs(),
                "Serving cached response"
            );
            return Ok(CachedResponse::Hit {
                payload,
                cache_control: Self::cache_control(max_age),
            });
        }

        let value = compute().await?;
        let payload =
            serde_json::to_vec(&value).map_err(|e| ServiceError::encode(e.to_string()))?;

        if let Err(err) = self.cache.set(&key, payload, Some(self.ttl)).await {
            log_error(components::RESPONSE_CACHE, operation, &err.to_string(), Some(&key));
            return Err(ServiceError::cache_write(
                key,
                err.to_string(),
                serde_json::to_value(&value).ok(),
            ));
        }

        Ok(CachedResponse::Fresh {
            value,
            cache_control: Self::cache_control(self.ttl),
        })
    }

    /// Drop the stored response for `(operation, args)`
    pub async fn invalidate<A: Serialize + ?Sized>(
        &self,
        operation: &str,
        args: &A,
    ) -> ServiceResult<bool> {
        let key = self.build_key(operation, args)?;
        Ok(self.cache.delete(&key).await? > 0)
    }
}
