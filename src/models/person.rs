use super::{uuid_list, window, Entity};
use crate::query_builder::{FilterParams, FilterValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
}

impl Entity for Person {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFilter {
    pub id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    pub excluded_ids: Option<Vec<Uuid>>,
    pub name: Option<String>,
    pub pagination: Option<(u64, u64)>,
    pub order: Option<Vec<String>>,
}

impl From<PersonFilter> for FilterParams {
    fn from(filter: PersonFilter) -> Self {
        FilterParams::new()
            .with_some("id", filter.id)
            .with_some("ids", filter.ids.map(uuid_list))
            .with_some("excluded_ids", filter.excluded_ids.map(uuid_list))
            .with_some("name", filter.name)
            .with_some("pagination", filter.pagination.map(window))
            .with_some("order", filter.order.map(FilterValue::Ordering))
    }
}
