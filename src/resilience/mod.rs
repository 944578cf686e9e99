//! # Resilience Module
//!
//! Fault tolerance primitives used to protect calls into the search backend.
//!
//! ## Architecture
//!
//! - **Circuit Breaker**: fails fast while a dependency is unhealthy, then admits a
//!   single probe call to test recovery
//! - **Retry Policy**: bounded exponential backoff for transient failures
//! - **Configuration**: thresholds and backoff tuning loaded from `MoviesConfig`
//!
//! The two layers are composed explicitly by the caller, breaker outermost:
//!
//! ```rust,no_run
//! use movies_core::resilience::{CircuitBreaker, CircuitBreakerConfig, RetryPolicy};
//!
//! # async fn example() {
//! let breaker = CircuitBreaker::new("search", CircuitBreakerConfig::default());
//! let retry = RetryPolicy::new(3, 0.5);
//!
//! let result = breaker
//!     .call(|_: &String| true, || async {
//!         retry
//!             .run("ping", |_: &String| true, || async { Ok::<_, String>("pong") })
//!             .await
//!             .map_err(|e| e.to_string())
//!     })
//!     .await;
//! # let _ = result;
//! # }
//! ```

pub mod circuit_breaker;
pub mod config;
pub mod retry;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerError, CircuitState};
pub use config::{CircuitBreakerConfig, RetryConfig};
pub use retry::{RetryError, RetryPolicy};
