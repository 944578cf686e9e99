use super::EntityService;
use crate::cache::KeyValueCache;
use crate::config::EntityConfig;
use crate::constants::ordering;
use crate::models::{Film, FilmFilter};
use crate::query_builder::{
    Filter, FilterSet, InFilter, LimitOffsetFilter, NotInFilter, OrderingFilter, RangeFilter,
    SearchFilter,
};
use crate::search::ResilientSearchClient;
use std::sync::Arc;

pub type FilmService = EntityService<Film, FilmFilter>;

/// Filters accepted by film listings
pub fn film_filter_set() -> FilterSet {
    FilterSet::builder()
        .field("id", Filter::new("id"))
        .field("ids", InFilter::new("id"))
        .field("excluded_ids", NotInFilter::new("id"))
        .field("title", SearchFilter::unbound())
        .field("description", SearchFilter::unbound())
        .field("imdb_rating", RangeFilter::unbound())
        .field("pagination", LimitOffsetFilter::new())
        .field("order", OrderingFilter::new(ordering::FILM_FIELDS.iter().copied()))
        .build()
}

pub fn film_service(
    cache: KeyValueCache,
    search: Arc<ResilientSearchClient>,
    config: &EntityConfig,
) -> FilmService {
    EntityService::new(
        cache,
        search,
        Arc::new(film_filter_set()),
        config.index.clone(),
        config.cache_ttl(),
    )
}
