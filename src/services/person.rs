use super::EntityService;
use crate::cache::KeyValueCache;
use crate::config::EntityConfig;
use crate::constants::ordering;
use crate::models::{Person, PersonFilter};
use crate::query_builder::{
    Filter, FilterSet, InFilter, LimitOffsetFilter, NotInFilter, OrderingFilter, SearchFilter,
};
use crate::search::ResilientSearchClient;
use std::sync::Arc;

pub type PersonService = EntityService<Person, PersonFilter>;

pub fn person_filter_set() -> FilterSet {
    FilterSet::builder()
        .field("id", Filter::new("id"))
        .field("ids", InFilter::new("id"))
        .field("excluded_ids", NotInFilter::new("id"))
        .field("name", SearchFilter::unbound())
        .field("pagination", LimitOffsetFilter::new())
        .field("order", OrderingFilter::new(ordering::PERSON_FIELDS.iter().copied()))
        .build()
}

pub fn person_service(
    cache: KeyValueCache,
    search: Arc<ResilientSearchClient>,
    config: &EntityConfig,
) -> PersonService {
    EntityService::new(
        cache,
        search,
        Arc::new(person_filter_set()),
        config.index.clone(),
        config.cache_ttl(),
    )
}
