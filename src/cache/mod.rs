//! # Cache Module
//!
//! Key-value caching in front of the search backend.
//!
//! - [`KeyValueStore`] - the storage boundary (Redis in production)
//! - [`InMemoryKeyValueStore`] - in-process store with passive expiry
//! - [`KeyValueCache`] - prefix-namespaced TTL cache shared by the entity services
//! - [`ResponseCache`] - memoization of whole encoded responses

pub mod errors;
pub mod key_value_cache;
pub mod memory;
pub mod response_cache;
pub mod store;

pub use errors::{CacheError, CacheResult};
pub use key_value_cache::KeyValueCache;
pub use memory::{glob_match, InMemoryKeyValueStore};
pub use response_cache::{CachedResponse, ResponseCache};
pub use store::KeyValueStore;
