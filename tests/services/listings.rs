use movies_core::bootstrap::MoviesCore;
use movies_core::cache::InMemoryKeyValueStore;
use movies_core::config::MoviesConfig;
use movies_core::error::ServiceError;
use movies_core::models::{FilmFilter, Genre, GenreFilter};
use movies_core::query_builder::FilterError;
use movies_core::search::BackendError;
use movies_core::test_helpers::MockSearchBackend;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn core(backend: Arc<MockSearchBackend>) -> MoviesCore {
    let mut config = MoviesConfig::default();
    config.resilience.retries = 0;
    MoviesCore::from_config(&config, Arc::new(InMemoryKeyValueStore::new()), backend)
}

#[tokio::test]
async fn test_listing_preserves_backend_order() {
    let backend = Arc::new(MockSearchBackend::new());
    let drama = Uuid::new_v4();
    let comedy = Uuid::new_v4();
    backend.set_search_results(
        "genres",
        vec![
            json!({"id": drama, "name": "Drama", "description": "Serious stories"}),
            json!({"id": comedy, "name": "Comedy", "description": "Funny stories"}),
        ],
    );
    let core = core(backend.clone());

    let genres: Vec<Genre> = core
        .genres()
        .get_multi(GenreFilter {
            order: Some(vec!["-name".to_string()]),
            pagination: Some((0, 2)),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        genres.iter().map(|g| g.id).collect::<Vec<_>>(),
        vec![drama, comedy]
    );
    assert_eq!(
        backend.last_search_body("genres"),
        Some(json!({
            "query": {"match_all": {}},
            "sort": [{"name.raw": {"order": "desc"}}],
            "size": 2
        }))
    );
}

#[tokio::test]
async fn test_listing_is_not_cached() {
    let backend = Arc::new(MockSearchBackend::new());
    let core = core(backend.clone());

    core.films().get_multi(FilmFilter::default()).await.unwrap();
    core.films().get_multi(FilmFilter::default()).await.unwrap();

    assert_eq!(backend.call_count("search"), 2);
}

#[tokio::test]
async fn test_query_syntax_error_is_a_client_error() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.fail_next(1, BackendError::bad_request("failed to create query"));
    let core = core(backend);

    let err = core
        .films()
        .get_multi(FilmFilter {
            title: Some("star".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_rejected_filter_never_reaches_backend() {
    let backend = Arc::new(MockSearchBackend::new());
    let core = core(backend.clone());
    let params = movies_core::query_builder::FilterParams::new().with("pagination", "ten");

    let filters = core.persons().filter_set();
    let err: ServiceError = filters.filter_query(&params).unwrap_err().into();

    assert!(matches!(
        err,
        ServiceError::InvalidFilter(FilterError::UnsupportedValue { .. })
    ));
    assert_eq!(err.status_code(), 422);
    assert_eq!(backend.total_calls(), 0);
}
