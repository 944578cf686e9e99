use movies_core::resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn breaker(max_failures: u32) -> CircuitBreaker {
    CircuitBreaker::new(
        "search",
        CircuitBreakerConfig {
            max_failures,
            reset_timeout: Duration::from_secs(10),
        },
    )
}

async fn fail(breaker: &CircuitBreaker) {
    let result = breaker
        .call(|_: &&str| true, || async { Err::<(), _>("boom") })
        .await;
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_opens_at_threshold_and_rejects_without_calling() {
    let breaker = breaker(2);

    fail(&breaker).await;
    assert_eq!(breaker.state(), CircuitState::Closed);
    assert_eq!(breaker.failure_count(), 1);

    fail(&breaker).await;
    assert_eq!(breaker.state(), CircuitState::Open);

    let calls = AtomicUsize::new(0);
    let counter = &calls;
    let result = breaker
        .call(|_: &&str| true, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, &str>(())
        })
        .await;

    assert!(matches!(
        result,
        Err(CircuitBreakerError::CircuitOpen { ref component }) if component == "search"
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_successful_probe_after_reset_timeout_closes() {
    let breaker = breaker(1);
    fail(&breaker).await;
    assert_eq!(breaker.state(), CircuitState::Open);

    tokio::time::advance(Duration::from_secs(5)).await;
    assert!(!breaker.allow());

    tokio::time::advance(Duration::from_secs(6)).await;
    let result = breaker
        .call(|_: &&str| true, || async { Ok::<_, &str>("pong") })
        .await;

    assert_eq!(result.unwrap(), "pong");
    assert_eq!(breaker.state(), CircuitState::Closed);
    assert_eq!(breaker.failure_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_probe_reopens() {
    let breaker = breaker(1);
    fail(&breaker).await;

    tokio::time::advance(Duration::from_secs(11)).await;
    fail(&breaker).await;

    assert_eq!(breaker.state(), CircuitState::Open);
    assert!(!breaker.allow());
}

#[tokio::test(start_paused = true)]
async fn test_only_one_probe_is_admitted() {
    let breaker = breaker(1);
    fail(&breaker).await;
    tokio::time::advance(Duration::from_secs(11)).await;

    assert!(breaker.allow());
    assert_eq!(breaker.state(), CircuitState::HalfOpen);
    assert!(!breaker.allow());

    breaker.record_success();
    assert_eq!(breaker.state(), CircuitState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_closed_call_leaves_half_open_slot_taken() {
    let breaker = breaker(1);

    let slow_call = tokio::time::timeout(
        Duration::from_secs(20),
        breaker.call(
            |_: &&str| true,
            || async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<(), &str>(())
            },
        ),
    );
    let trip_and_recover = async {
        // Let the slow call be admitted while the circuit is still closed
        tokio::task::yield_now().await;
        fail(&breaker).await;
        assert_eq!(breaker.state(), CircuitState::Open);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(breaker.allow());

        // Outlive the slow call's deadline
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
        assert!(!breaker.allow());
    };

    let (timed_out, ()) = tokio::join!(slow_call, trip_and_recover);
    assert!(timed_out.is_err());
}

#[tokio::test]
async fn test_errors_rejected_by_the_predicate_count_as_success() {
    let breaker = breaker(1);

    let result = breaker
        .call(|err: &&str| *err != "not found", || async { Err::<(), _>("not found") })
        .await;

    assert!(matches!(result, Err(CircuitBreakerError::OperationFailed("not found"))));
    assert_eq!(breaker.state(), CircuitState::Closed);
    assert_eq!(breaker.failure_count(), 0);
}

#[test]
fn test_force_open_and_closed() {
    let breaker = breaker(5);

    breaker.force_open();
    assert_eq!(breaker.state(), CircuitState::Open);

    breaker.force_closed();
    assert_eq!(breaker.state(), CircuitState::Closed);
}
