//! # Service Error Types
//!
//! Errors surfaced by the entity services and the response cache. Every variant maps
//! to a distinct status code so the boundary layer can render it without inspecting
//! messages.

use crate::cache::CacheError;
use crate::query_builder::FilterError;
use crate::search::SearchError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Corrupt cache entry at {key}: {message}")]
    CorruptCacheEntry { key: String, message: String },

    /// The value was produced but could not be cached; `document` still holds it
    #[error("Failed to write cache entry {key}: {message}")]
    CacheWrite {
        key: String,
        message: String,
        document: Option<Value>,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Failed to decode document {index}/{id}: {message}")]
    Decode {
        index: String,
        id: String,
        message: String,
    },

    #[error("Failed to encode value: {message}")]
    Encode { message: String },

    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl ServiceError {
    pub fn corrupt_cache_entry(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptCacheEntry {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn cache_write(
        key: impl Into<String>,
        message: impl Into<String>,
        document: Option<Value>,
    ) -> Self {
        Self::CacheWrite {
            key: key.into(),
            message: message.into(),
            document,
        }
    }

    pub fn decode(
        index: impl Into<String>,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            index: index.into(),
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidFilter(_) => 422,
            ServiceError::Search(err) => err.status_code(),
            ServiceError::CorruptCacheEntry { .. }
            | ServiceError::CacheWrite { .. }
            | ServiceError::Cache(_)
            | ServiceError::Decode { .. }
            | ServiceError::Encode { .. } => 500,
        }
    }

    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Search(err) => err.is_transient(),
            ServiceError::Cache(CacheError::Connection { .. }) => true,
            _ => false,
        }
    }

    /// The value a failed cache write was carrying, decoded as `E`
    pub fn recover_entity<E: DeserializeOwned>(&self) -> Option<E> {
        match self {
            ServiceError::CacheWrite {
                document: Some(document),
                ..
            } => serde_json::from_value(document.clone()).ok(),
            _ => None,
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
