//! # Search Module
//!
//! Access to the document-search backend.
//!
//! - [`backend`] - the [`DocumentSearchBackend`] boundary and its raw errors
//! - [`errors`] - [`SearchError`], the typed outcome taxonomy callers reason about
//! - [`client`] - [`ResilientSearchClient`], the breaker and retry protected facade

pub mod backend;
pub mod client;
pub mod errors;

pub use backend::{BackendError, BulkAction, DocumentSearchBackend};
pub use client::ResilientSearchClient;
pub use errors::{SearchError, SearchResult};
