//! # Search Error Types
//!
//! Typed translation of backend failures into the outcomes the resilience layer and
//! the entity services reason about.

use crate::resilience::{CircuitBreakerError, RetryError};
use crate::search::BackendError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Circuit breaker is open for component: {component}")]
    CircuitOpen { component: String },

    #[error("Document not found: {doc_id}")]
    DocumentNotFound { doc_id: String },

    #[error("Invalid search query: {detail}")]
    QuerySyntax { detail: String },

    #[error("Search backend error: {detail}")]
    Backend { detail: String },

    #[error("[{operation}] Max retry attempts exceeded after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        #[source]
        last_error: Box<SearchError>,
    },
}

impl SearchError {
    pub fn circuit_open(component: impl Into<String>) -> Self {
        Self::CircuitOpen {
            component: component.into(),
        }
    }

    pub fn document_not_found(doc_id: impl Into<String>) -> Self {
        Self::DocumentNotFound {
            doc_id: doc_id.into(),
        }
    }

    pub fn query_syntax(detail: impl Into<String>) -> Self {
        Self::QuerySyntax {
            detail: detail.into(),
        }
    }

    pub fn backend(detail: impl Into<String>) -> Self {
        Self::Backend {
            detail: detail.into(),
        }
    }

    /// Only availability faults are worth another attempt
    pub fn is_retriable(&self) -> bool {
        matches!(self, SearchError::Backend { .. })
    }

    /// Whether this outcome should be recorded as a breaker failure.
    ///
    /// Not-found and bad-query outcomes mean the backend answered.
    pub fn counts_as_breaker_failure(&self) -> bool {
        matches!(
            self,
            SearchError::Backend { .. } | SearchError::RetriesExhausted { .. }
        )
    }

    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::CircuitOpen { .. } => 503,
            SearchError::DocumentNotFound { .. } => 404,
            SearchError::QuerySyntax { .. } => 400,
            SearchError::Backend { .. } | SearchError::RetriesExhausted { .. } => 502,
        }
    }

    /// Whether the same request may succeed later without change
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SearchError::CircuitOpen { .. }
                | SearchError::Backend { .. }
                | SearchError::RetriesExhausted { .. }
        )
    }
}

impl From<BackendError> for SearchError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { id, .. } => SearchError::document_not_found(id),
            BackendError::BadRequest { detail } => SearchError::query_syntax(detail),
            other => SearchError::backend(other.to_string()),
        }
    }
}

impl From<RetryError<SearchError>> for SearchError {
    fn from(err: RetryError<SearchError>) -> Self {
        match err {
            RetryError::Exhausted {
                operation,
                attempts,
                last_error,
            } => SearchError::RetriesExhausted {
                operation,
                attempts,
                last_error: Box::new(last_error),
            },
            RetryError::Aborted(err) => err,
        }
    }
}

impl From<CircuitBreakerError<SearchError>> for SearchError {
    fn from(err: CircuitBreakerError<SearchError>) -> Self {
        match err {
            CircuitBreakerError::CircuitOpen { component } => SearchError::circuit_open(component),
            CircuitBreakerError::OperationFailed(inner) => inner,
        }
    }
}

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;
