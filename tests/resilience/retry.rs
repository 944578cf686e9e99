use movies_core::resilience::{RetryError, RetryPolicy};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_gives_up_after_retries_plus_one_attempts() {
    let policy = RetryPolicy::new(2, 1.0);
    let calls = AtomicU32::new(0);
    let counter = &calls;
    let started = Instant::now();

    let result = policy
        .run("get_document", |_: &String| true, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>("unavailable".to_string())
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    match result {
        Err(RetryError::Exhausted {
            operation,
            attempts,
            last_error,
        }) => {
            assert_eq!(operation, "get_document");
            assert_eq!(attempts, 3);
            assert_eq!(last_error, "unavailable");
        }
        other => panic!("expected exhausted retries, got {other:?}"),
    }
    // 1s after the first attempt and 2s after the second
    assert!(started.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_non_retriable_error_stops_immediately() {
    let policy = RetryPolicy::new(5, 0.5);
    let calls = AtomicU32::new(0);
    let counter = &calls;

    let result = policy
        .run("search", |err: &String| err != "bad query", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>("bad query".to_string())
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.unwrap_err().into_inner(), "bad query");
}

#[tokio::test(start_paused = true)]
async fn test_recovers_mid_budget() {
    let policy = RetryPolicy::new(3, 0.1);
    let calls = AtomicU32::new(0);
    let counter = &calls;

    let result = policy
        .run("get_document", |_: &String| true, move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err("reset".to_string())
            } else {
                Ok(42)
            }
        })
        .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_delay_doubles_per_attempt() {
    let policy = RetryPolicy::new(5, 0.5);
    assert_eq!(policy.delay_for(0), Duration::from_millis(500));
    assert_eq!(policy.delay_for(1), Duration::from_secs(1));
    assert_eq!(policy.delay_for(2), Duration::from_secs(2));

    assert_eq!(RetryPolicy::disabled().delay_for(3), Duration::ZERO);
}
