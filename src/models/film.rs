use super::{uuid_list, window, Credit, Entity};
use crate::query_builder::{FilterParams, FilterValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Film document as stored in the `movies` index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub imdb_rating: f64,
    /// Genre names flattened for full-text search
    pub genres: String,
    pub actors_names: String,
    pub directors_names: String,
    pub writers_names: String,
    #[serde(default)]
    pub actors: Vec<Credit>,
    #[serde(default)]
    pub directors: Vec<Credit>,
    #[serde(default)]
    pub writers: Vec<Credit>,
}

impl Entity for Film {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Filter parameters accepted for film listings. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmFilter {
    pub id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    pub excluded_ids: Option<Vec<Uuid>>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Inclusive `(min, max)` rating bounds
    pub imdb_rating: Option<(Option<f64>, Option<f64>)>,
    /// `(offset, limit)`
    pub pagination: Option<(u64, u64)>,
    pub order: Option<Vec<String>>,
}

impl From<FilmFilter> for FilterParams {
    fn from(filter: FilmFilter) -> Self {
        FilterParams::new()
            .with_some("id", filter.id)
            .with_some("ids", filter.ids.map(uuid_list))
            .with_some("excluded_ids", filter.excluded_ids.map(uuid_list))
            .with_some("title", filter.title)
            .with_some("description", filter.description)
            .with_some(
                "imdb_rating",
                filter
                    .imdb_rating
                    .map(|(low, high)| FilterValue::range(low, high)),
            )
            .with_some("pagination", filter.pagination.map(window))
            .with_some("order", filter.order.map(FilterValue::Ordering))
    }
}
