//! # Domain Models
//!
//! Read-only entities served from the search index and the cache, plus the typed
//! filter parameters accepted for each of them.

pub mod credit;
pub mod film;
pub mod genre;
pub mod person;

pub use credit::{Actor, Credit, Director, Writer};
pub use film::{Film, FilmFilter};
pub use genre::{Genre, GenreFilter};
pub use person::{Person, PersonFilter};

use crate::query_builder::FilterValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// An immutable value object with a stable identifier.
///
/// The cached form is the entity's JSON encoding, so a document fetched from the
/// backend and an entry read back from the cache decode the same way.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    fn encode_cached(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    fn decode_cached(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Identifier lists are matched against the keyword `id` field as strings
pub(crate) fn uuid_list(ids: Vec<Uuid>) -> FilterValue {
    FilterValue::list(ids.into_iter().map(|id| id.to_string()))
}

pub(crate) fn window((offset, limit): (u64, u64)) -> FilterValue {
    FilterValue::window(offset, limit)
}
