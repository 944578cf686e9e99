use super::EntityService;
use crate::cache::KeyValueCache;
use crate::config::EntityConfig;
use crate::constants::ordering;
use crate::models::{Genre, GenreFilter};
use crate::query_builder::{
    Filter, FilterSet, InFilter, LimitOffsetFilter, NotInFilter, OrderingFilter, SearchFilter,
};
use crate::search::ResilientSearchClient;
use std::sync::Arc;

pub type GenreService = EntityService<Genre, GenreFilter>;

pub fn genre_filter_set() -> FilterSet {
    FilterSet::builder()
        .field("id", Filter::new("id"))
        .field("ids", InFilter::new("id"))
        .field("excluded_ids", NotInFilter::new("id"))
        .field("name", SearchFilter::unbound())
        .field("description", SearchFilter::unbound())
        .field("pagination", LimitOffsetFilter::new())
        .field("order", OrderingFilter::new(ordering::GENRE_FIELDS.iter().copied()))
        .build()
}

pub fn genre_service(
    cache: KeyValueCache,
    search: Arc<ResilientSearchClient>,
    config: &EntityConfig,
) -> GenreService {
    EntityService::new(
        cache,
        search,
        Arc::new(genre_filter_set()),
        config.index.clone(),
        config.cache_ttl(),
    )
}
