use movies_core::cache::{InMemoryKeyValueStore, KeyValueCache, KeyValueStore};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_entries_expire_after_ttl() {
    let cache = KeyValueCache::new(Arc::new(InMemoryKeyValueStore::new()), "main");

    cache
        .set("movies:1", b"film".to_vec(), Some(Duration::from_secs(300)))
        .await
        .unwrap();

    let (ttl, value) = cache.get_with_ttl("movies:1").await.unwrap();
    assert_eq!(value.as_deref(), Some(&b"film"[..]));
    assert_eq!(ttl, Some(Duration::from_secs(300)));

    tokio::time::advance(Duration::from_secs(301)).await;
    assert_eq!(cache.get("movies:1").await.unwrap(), None);
}

#[tokio::test]
async fn test_prefixes_isolate_namespaces() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
    let main = KeyValueCache::new(Arc::clone(&store), "main");
    let other = KeyValueCache::new(Arc::clone(&store), "other");

    main.set("genres:1", b"a".to_vec(), None).await.unwrap();
    other.set("genres:1", b"b".to_vec(), None).await.unwrap();

    assert_eq!(main.clear("genres:*").await.unwrap(), 1);
    assert_eq!(main.get("genres:1").await.unwrap(), None);
    assert_eq!(other.get("genres:1").await.unwrap(), Some(b"b".to_vec()));
    assert_eq!(store.get("other:genres:1").await.unwrap(), Some(b"b".to_vec()));
}

#[tokio::test]
async fn test_delete_reports_removed_count() {
    let cache = KeyValueCache::new(Arc::new(InMemoryKeyValueStore::new()), "main");
    cache.set("persons:1", b"p".to_vec(), None).await.unwrap();

    assert_eq!(cache.delete("persons:1").await.unwrap(), 1);
    assert_eq!(cache.delete("persons:1").await.unwrap(), 0);
}

#[test]
fn test_usable_from_a_blocking_context() {
    let cache = KeyValueCache::new(Arc::new(InMemoryKeyValueStore::new()), "");

    tokio_test::block_on(async {
        cache.set("genres:1", b"g".to_vec(), None).await.unwrap();
        assert_eq!(cache.build_key("genres:1"), "genres:1");
        assert_eq!(cache.get("genres:1").await.unwrap(), Some(b"g".to_vec()));
    });
}
