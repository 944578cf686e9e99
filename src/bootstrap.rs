//! # Core Bootstrap
//!
//! Wires one shared resilient search client, one key-value cache and the three entity
//! services from a [`MoviesConfig`]. The store and backend are injected so the same
//! wiring serves production adapters and the in-memory test doubles.

use crate::cache::{KeyValueCache, KeyValueStore, ResponseCache};
use crate::config::MoviesConfig;
use crate::constants::components;
use crate::resilience::RetryPolicy;
use crate::search::{DocumentSearchBackend, ResilientSearchClient, SearchResult};
use crate::services::{
    film_service, genre_service, person_service, FilmService, GenreService, PersonService,
};
use std::sync::Arc;
use tracing::info;

/// Fully wired access layer
#[derive(Debug, Clone)]
pub struct MoviesCore {
    search: Arc<ResilientSearchClient>,
    cache: KeyValueCache,
    films: FilmService,
    genres: GenreService,
    persons: PersonService,
    responses: ResponseCache,
}

impl MoviesCore {
    pub fn from_config(
        config: &MoviesConfig,
        kv_store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn DocumentSearchBackend>,
    ) -> Self {
        let search = Arc::new(ResilientSearchClient::with_config(
            backend,
            components::SEARCH,
            config.resilience.circuit_breaker(),
            RetryPolicy::from_config(&config.resilience.retry()),
        ));
        let cache = KeyValueCache::new(kv_store, config.cache.prefix.clone());

        let films = film_service(cache.clone(), Arc::clone(&search), &config.entities.films);
        let genres = genre_service(cache.clone(), Arc::clone(&search), &config.entities.genres);
        let persons = person_service(cache.clone(), Arc::clone(&search), &config.entities.persons);
        let responses = ResponseCache::new(
            cache.clone(),
            config.cache.response_ttl(),
            config.cache.response_namespace.clone(),
        );

        info!(
            app = %config.app.name,
            cache_prefix = %config.cache.prefix,
            max_failures = config.resilience.max_failures,
            retries = config.resilience.retries,
            "✅ Movies core initialized"
        );

        Self {
            search,
            cache,
            films,
            genres,
            persons,
            responses,
        }
    }

    pub fn search_client(&self) -> &Arc<ResilientSearchClient> {
        &self.search
    }

    pub fn cache(&self) -> &KeyValueCache {
        &self.cache
    }

    pub fn films(&self) -> &FilmService {
        &self.films
    }

    pub fn genres(&self) -> &GenreService {
        &self.genres
    }

    pub fn persons(&self) -> &PersonService {
        &self.persons
    }

    pub fn responses(&self) -> &ResponseCache {
        &self.responses
    }

    /// Close the search backend connections
    pub async fn shutdown(&self) -> SearchResult<()> {
        self.search.close().await
    }
}
