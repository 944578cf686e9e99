use super::{uuid_list, window, Entity};
use crate::query_builder::{FilterParams, FilterValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl Entity for Genre {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreFilter {
    pub id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    pub excluded_ids: Option<Vec<Uuid>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub pagination: Option<(u64, u64)>,
    pub order: Option<Vec<String>>,
}

impl From<GenreFilter> for FilterParams {
    fn from(filter: GenreFilter) -> Self {
        FilterParams::new()
            .with_some("id", filter.id)
            .with_some("ids", filter.ids.map(uuid_list))
            .with_some("excluded_ids", filter.excluded_ids.map(uuid_list))
            .with_some("name", filter.name)
            .with_some("description", filter.description)
            .with_some("pagination", filter.pagination.map(window))
            .with_some("order", filter.order.map(FilterValue::Ordering))
    }
}
