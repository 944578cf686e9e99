//! # Circuit Breaker Protected Search Client
//!
//! Wraps a [`DocumentSearchBackend`] with circuit breaker protection and bounded
//! retry. Every backend call is translated to a [`SearchError`] first, retried while
//! the error is a backend availability fault, and the overall outcome is recorded by
//! the breaker.

use crate::logging::log_search_operation;
use crate::query_builder::QueryDocument;
use crate::resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryPolicy};
use crate::search::{BackendError, BulkAction, DocumentSearchBackend, SearchError, SearchResult};
use futures::TryFutureExt;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Search client with circuit breaker and retry protection
#[derive(Debug, Clone)]
pub struct ResilientSearchClient {
    /// Underlying search backend
    backend: Arc<dyn DocumentSearchBackend>,

    /// Shared by every clone of this client
    breaker: Arc<CircuitBreaker>,

    retry: RetryPolicy,

    /// Component name for circuit breaker identification
    component_name: String,
}

impl ResilientSearchClient {
    pub fn new(
        backend: Arc<dyn DocumentSearchBackend>,
        breaker: Arc<CircuitBreaker>,
        retry: RetryPolicy,
    ) -> Self {
        let component_name = breaker.name().to_string();
        Self {
            backend,
            breaker,
            retry,
            component_name,
        }
    }

    /// Create a client that owns a fresh breaker built from `circuit_config`
    pub fn with_config(
        backend: Arc<dyn DocumentSearchBackend>,
        component_name: impl Into<String>,
        circuit_config: CircuitBreakerConfig,
        retry: RetryPolicy,
    ) -> Self {
        let breaker = Arc::new(CircuitBreaker::new(component_name, circuit_config));
        Self::new(backend, breaker, retry)
    }

    pub fn circuit_breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Index a document with circuit breaker protection
    pub async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: Value,
    ) -> SearchResult<Value> {
        self.execute("index_document", index, || {
            self.backend.index(index, id, document.clone())
        })
        .await
    }

    /// Fetch one document source; [`SearchError::DocumentNotFound`] when absent
    pub async fn get_document(&self, index: &str, id: &str) -> SearchResult<Value> {
        self.execute("get_document", index, || self.backend.get(index, id))
            .await
    }

    /// Run `query` against `index`. A query with no boolean clauses matches everything.
    pub async fn search(&self, index: &str, query: &QueryDocument) -> SearchResult<Vec<Value>> {
        let mut body = query.to_body();
        if !query.has_query() {
            if let Value::Object(map) = &mut body {
                map.insert("query".to_string(), json!({ "match_all": {} }));
            }
        }
        debug!(index, body = %body, "Executing search");

        let body = &body;
        self.execute("search", index, || self.backend.search(index, body))
            .await
    }

    pub async fn delete_document(&self, index: &str, id: &str) -> SearchResult<Value> {
        self.execute("delete_document", index, || self.backend.delete(index, id))
            .await
    }

    pub async fn bulk_index(&self, actions: Vec<BulkAction>) -> SearchResult<Value> {
        let actions = &actions;
        self.execute("bulk_index", "_bulk", || self.backend.bulk(actions.clone()))
            .await
    }

    /// Release the backend's connections. Not guarded by the breaker.
    pub async fn close(&self) -> SearchResult<()> {
        self.backend.close().await?;
        info!(component = %self.component_name, "Search client closed");
        Ok(())
    }

    /// Breaker outermost, retry inside, error translation innermost
    async fn execute<T, F, Fut>(&self, operation: &str, index: &str, call: F) -> SearchResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let started = Instant::now();
        let retry = &self.retry;

        let result = self
            .breaker
            .call(SearchError::counts_as_breaker_failure, move || async move {
                retry
                    .run(operation, SearchError::is_retriable, || {
                        call().map_err(SearchError::from)
                    })
                    .await
                    .map_err(SearchError::from)
            })
            .await
            .map_err(SearchError::from);

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(_) => log_search_operation(operation, Some(index), "ok", Some(duration_ms), None),
            Err(err) => log_search_operation(
                operation,
                Some(index),
                "error",
                Some(duration_ms),
                Some(&err.to_string()),
            ),
        }
        result
    }
}
