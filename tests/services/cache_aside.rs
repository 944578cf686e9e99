use movies_core::bootstrap::MoviesCore;
use movies_core::config::MoviesConfig;
use movies_core::error::ServiceError;
use movies_core::models::{Film, Person};
use movies_core::search::{BackendError, SearchError};
use movies_core::services::EntityReader;
use movies_core::test_helpers::{FailingKeyValueStore, MockSearchBackend};
use movies_core::KeyValueStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const FILM_ID: &str = "3d825f60-9fff-4dfe-b294-1a45fa1e115d";
const PERSON_ID: &str = "26e83050-29ef-4163-a99d-b546cac208f8";

fn film_document() -> Value {
    json!({
        "id": FILM_ID,
        "title": "Star Wars: Episode IV - A New Hope",
        "description": "The Imperial Forces hold Princess Leia hostage",
        "imdb_rating": 8.6,
        "genres": "Action Adventure Fantasy Sci-Fi",
        "actors_names": "Mark Hamill Harrison Ford",
        "directors_names": "George Lucas",
        "writers_names": "George Lucas",
        "actors": [
            {"id": PERSON_ID, "name": "Mark Hamill"}
        ],
        "directors": [],
        "writers": []
    })
}

struct Fixture {
    core: MoviesCore,
    store: Arc<FailingKeyValueStore>,
    backend: Arc<MockSearchBackend>,
}

fn fixture() -> Fixture {
    let store = Arc::new(FailingKeyValueStore::new());
    let backend = Arc::new(MockSearchBackend::new());
    backend.insert_document("movies", FILM_ID, film_document());

    let mut config = MoviesConfig::default();
    config.resilience.retries = 1;
    config.resilience.backoff_factor = 0.0;
    let core = MoviesCore::from_config(&config, store.clone(), backend.clone());

    Fixture {
        core,
        store,
        backend,
    }
}

#[tokio::test]
async fn test_miss_then_hit() {
    let f = fixture();

    let first = f.core.films().get_by_id(FILM_ID).await.unwrap().unwrap();
    let second = f.core.films().get_by_id(FILM_ID).await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.actors.len(), 1);
    assert_eq!(first.actors[0].name, "Mark Hamill");
    assert_eq!(f.backend.call_count("get"), 1);
    assert_eq!(f.store.writes(), 1);
    assert_eq!(f.store.last_ttl(), Some(Duration::from_secs(300)));
    assert!(f
        .store
        .inner()
        .get(&format!("main:movies:{FILM_ID}"))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_missing_entity_is_none_and_not_cached() {
    let f = fixture();

    let person: Option<Person> = f.core.persons().get_by_id(PERSON_ID).await.unwrap();

    assert!(person.is_none());
    assert_eq!(f.store.writes(), 0);
    assert_eq!(f.core.search_client().circuit_breaker().failure_count(), 0);
}

#[tokio::test]
async fn test_corrupt_cache_entry_is_reported() {
    let f = fixture();
    f.store
        .inner()
        .set(&format!("main:movies:{FILM_ID}"), b"{not json".to_vec(), None)
        .await
        .unwrap();

    let err = f.core.films().get_by_id(FILM_ID).await.unwrap_err();

    assert!(matches!(
        err,
        ServiceError::CorruptCacheEntry { ref key, .. } if key == &format!("main:movies:{FILM_ID}")
    ));
    assert_eq!(f.backend.call_count("get"), 0);
}

#[tokio::test]
async fn test_cache_write_failure_keeps_the_entity_recoverable() {
    let f = fixture();
    f.store.set_fail_writes(true);

    let err = f.core.films().get_by_id(FILM_ID).await.unwrap_err();
    let film: Film = err.recover_entity().unwrap();

    assert_eq!(film.id.to_string(), FILM_ID);
}

#[tokio::test]
async fn test_cache_read_failure_propagates() {
    let f = fixture();
    f.store.set_fail_reads(true);

    let err = f.core.films().get_by_id(FILM_ID).await.unwrap_err();

    assert!(matches!(err, ServiceError::Cache(_)));
    assert!(err.is_transient());
    assert_eq!(f.backend.call_count("get"), 0);
}

#[tokio::test]
async fn test_transient_backend_failure_is_retried_through_the_service() {
    let f = fixture();
    f.backend.fail_next(1, BackendError::transport("connection reset"));

    let film = f.core.films().get_by_id(FILM_ID).await.unwrap();

    assert!(film.is_some());
    assert_eq!(f.backend.call_count("get"), 2);
}

#[tokio::test]
async fn test_exhausted_retries_surface_as_search_error() {
    let f = fixture();
    f.backend.fail_next(10, BackendError::api(503, "unavailable"));

    let err = f.core.films().get_by_id(FILM_ID).await.unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Search(SearchError::RetriesExhausted { attempts: 2, .. })
    ));
    assert_eq!(err.status_code(), 502);
}

#[tokio::test]
async fn test_reader_trait_object() {
    let f = fixture();
    let reader: &dyn EntityReader<Film, movies_core::models::FilmFilter> = f.core.films();

    assert!(reader.get_by_id(FILM_ID).await.unwrap().is_some());
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let f = fixture();
    f.core.films().get_by_id(FILM_ID).await.unwrap();

    assert!(f.core.films().invalidate(FILM_ID).await.unwrap());
    f.core.films().get_by_id(FILM_ID).await.unwrap();

    assert_eq!(f.backend.call_count("get"), 2);
}
