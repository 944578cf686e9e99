//! Boundary to the physical document-search store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised by a [`DocumentSearchBackend`] implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Bad request: {detail}")]
    BadRequest { detail: String },

    #[error("Search API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Transport error: {detail}")]
    Transport { detail: String },
}

impl BackendError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }
}

/// One entry of a bulk indexing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAction {
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub document: Value,
}

impl BulkAction {
    pub fn index(index: impl Into<String>, id: Option<String>, document: Value) -> Self {
        Self {
            index: index.into(),
            id,
            document,
        }
    }
}

/// Document-search store the resilient client delegates to.
///
/// Implementations are expected to pool connections internally and be shared
/// across tasks.
#[async_trait]
pub trait DocumentSearchBackend: fmt::Debug + Send + Sync {
    /// Store `document`, assigning an id when none is given
    async fn index(
        &self,
        collection: &str,
        id: Option<&str>,
        document: Value,
    ) -> Result<Value, BackendError>;

    /// Fetch one document source; [`BackendError::NotFound`] when absent
    async fn get(&self, collection: &str, id: &str) -> Result<Value, BackendError>;

    /// Run a query body and return the matching document sources in rank order
    async fn search(&self, collection: &str, body: &Value) -> Result<Vec<Value>, BackendError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<Value, BackendError>;

    async fn bulk(&self, actions: Vec<BulkAction>) -> Result<Value, BackendError>;

    async fn close(&self) -> Result<(), BackendError>;
}
