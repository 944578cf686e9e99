use movies_core::cache::{CachedResponse, KeyValueCache, ResponseCache};
use movies_core::error::ServiceError;
use movies_core::test_helpers::FailingKeyValueStore;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn response_cache(store: Arc<FailingKeyValueStore>) -> ResponseCache {
    ResponseCache::new(
        KeyValueCache::new(store, "main"),
        Duration::from_secs(300),
        "responses",
    )
}

#[tokio::test]
async fn test_second_call_is_served_from_cache() {
    let store = Arc::new(FailingKeyValueStore::new());
    let responses = response_cache(store.clone());
    let computed = AtomicUsize::new(0);
    let counter = &computed;
    let args = json!({"page": 1, "size": 10});

    let first = responses
        .cached("film_list", &args, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ServiceError>(vec!["Star Wars".to_string()])
        })
        .await
        .unwrap();
    assert!(!first.is_hit());
    assert_eq!(first.cache_control(), "max-age=300");

    let second = responses
        .cached("film_list", &args, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ServiceError>(vec!["other".to_string()])
        })
        .await
        .unwrap();

    assert!(second.is_hit());
    assert_eq!(computed.load(Ordering::SeqCst), 1);
    assert_eq!(second.into_bytes().unwrap(), br#"["Star Wars"]"#.to_vec());
    assert_eq!(store.last_ttl(), Some(Duration::from_secs(300)));
}

#[tokio::test]
async fn test_distinct_arguments_use_distinct_keys() {
    let responses = response_cache(Arc::new(FailingKeyValueStore::new()));

    let a = responses.build_key("film_list", &json!({"page": 1})).unwrap();
    let b = responses.build_key("film_list", &json!({"page": 2})).unwrap();

    assert_ne!(a, b);
    assert!(a.starts_with("responses:film_list:"));
    assert_eq!(a, responses.build_key("film_list", &json!({"page": 1})).unwrap());
}

#[tokio::test]
async fn test_failed_write_still_carries_the_value() {
    let store = Arc::new(FailingKeyValueStore::new());
    store.set_fail_writes(true);
    let responses = response_cache(store);

    let err = responses
        .cached("genre_list", &(), || async { Ok::<_, ServiceError>(json!(["Drama"])) })
        .await
        .unwrap_err();

    match err {
        ServiceError::CacheWrite { document, .. } => assert_eq!(document, Some(json!(["Drama"]))),
        other => panic!("expected cache write error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalidate_forces_recompute() {
    let responses = response_cache(Arc::new(FailingKeyValueStore::new()));

    responses
        .cached("person_list", &"q", || async { Ok::<_, ServiceError>(1) })
        .await
        .unwrap();
    assert!(responses.invalidate("person_list", &"q").await.unwrap());

    let again = responses
        .cached("person_list", &"q", || async { Ok::<_, ServiceError>(2) })
        .await
        .unwrap();
    assert!(matches!(again, CachedResponse::Fresh { value: 2, .. }));
}
