#![allow(clippy::doc_markdown)] // Allow technical terms like Elasticsearch, Redis in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Movies Core
//!
//! Resilient query and cache-aside access layer for a catalogue of films, genres and
//! persons held in a document-search backend.
//!
//! ## Overview
//!
//! Every call into the search backend passes through a circuit breaker and a bounded
//! exponential-backoff retry policy. Single-entity reads go through a key-value cache
//! first and populate it on a miss. Filtered listings are compiled from typed filter
//! parameters into backend query documents by a declarative filter set.
//!
//! ## Module Organization
//!
//! - [`resilience`] - Circuit breaker and retry policy
//! - [`query_builder`] - Query documents, filter fields and filter sets
//! - [`search`] - Backend abstraction and the resilient search client
//! - [`cache`] - Key-value store abstraction, prefixed cache and response cache
//! - [`services`] - Generic cache-aside entity service and the per-entity wiring
//! - [`models`] - Film, genre and person entities and their filter parameters
//! - [`config`] - YAML configuration with environment overrides
//! - [`bootstrap`] - One-call wiring of the whole layer
//! - [`error`] - Service-level errors
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use movies_core::bootstrap::MoviesCore;
//! use movies_core::cache::InMemoryKeyValueStore;
//! use movies_core::config::ConfigManager;
//! use movies_core::models::FilmFilter;
//! use movies_core::search::DocumentSearchBackend;
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     backend: Arc<dyn DocumentSearchBackend>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! // `backend` is the adapter for the deployed search cluster
//! let manager = ConfigManager::load()?;
//! let core = MoviesCore::from_config(
//!     manager.config(),
//!     Arc::new(InMemoryKeyValueStore::new()),
//!     backend,
//! );
//!
//! let top_rated = core
//!     .films()
//!     .get_multi(FilmFilter {
//!         order: Some(vec!["-imdb_rating".to_string()]),
//!         pagination: Some((0, 10)),
//!         ..Default::default()
//!     })
//!     .await?;
//! # let _ = top_rated;
//! core.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit, integration and property tests
//! ```

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod resilience;
pub mod search;
pub mod services;

// Test doubles (only available in test builds or with the test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

pub use bootstrap::MoviesCore;
pub use cache::{KeyValueCache, KeyValueStore, ResponseCache};
pub use config::{ConfigManager, MoviesConfig};
pub use error::{ServiceError, ServiceResult};
pub use models::{Entity, Film, Genre, Person};
pub use resilience::{CircuitBreaker, CircuitState, RetryPolicy};
pub use search::{DocumentSearchBackend, ResilientSearchClient, SearchError};
pub use services::{EntityReader, EntityService};
