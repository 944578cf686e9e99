//! # Circuit Breaker Implementation
//!
//! Provides fault isolation for calls into the search backend. This implementation
//! follows the classic circuit breaker pattern with three states: Closed (normal
//! operation), Open (failing fast), and Half-Open (a single probe tests recovery).
//!
//! All state lives behind one mutex that is only held for the synchronous transition,
//! never across an `.await`, so concurrent tasks sharing a breaker observe a single
//! consistent sequence of transitions.

use crate::resilience::CircuitBreakerConfig;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Circuit breaker states representing the current operational mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    /// Normal operation - all calls are allowed through
    Closed,
    /// Failure mode - all calls fail fast without executing
    Open,
    /// Testing recovery - one probe call is allowed through
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
            CircuitState::HalfOpen => write!(f, "half_open"),
        }
    }
}

/// Errors that can occur during circuit breaker operation
#[derive(Debug, thiserror::Error)]
pub enum CircuitBreakerError<E> {
    /// Circuit is open, the call was rejected without being attempted
    #[error("Circuit breaker is open for {component}")]
    CircuitOpen { component: String },

    /// Operation was attempted and failed
    #[error("Operation failed: {0}")]
    OperationFailed(E),
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    failure_count: u32,
    last_failure_time: Option<Instant>,
    probe_in_flight: bool,
    /// Bumped on every probe admission so a permit only releases its own probe
    probe_generation: u64,
}

/// How a call got past [`CircuitBreaker::allow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    Normal,
    Probe(u64),
}

/// Failure-count circuit breaker shared by every caller of one client
#[derive(Debug)]
pub struct CircuitBreaker {
    /// Component name for logging
    name: String,

    config: CircuitBreakerConfig,

    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with the given name and configuration
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        let name = name.into();
        info!(
            component = %name,
            max_failures = config.max_failures,
            reset_timeout_seconds = config.reset_timeout.as_secs(),
            "🛡️ Circuit breaker initialized"
        );

        Self {
            name,
            config,
            inner: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                failure_count: 0,
                last_failure_time: None,
                probe_in_flight: false,
                probe_generation: 0,
            }),
        }
    }

    /// Get component name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Current state without evaluating the reset timeout
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    pub fn failure_count(&self) -> u32 {
        self.inner.lock().failure_count
    }

    pub fn last_failure_time(&self) -> Option<Instant> {
        self.inner.lock().last_failure_time
    }

    /// Decide whether a call may proceed.
    ///
    /// Closed always admits. Open admits nothing until `reset_timeout` has elapsed since
    /// the last failure, then moves to Half-Open and admits exactly one probe. While the
    /// probe is in flight every other caller is rejected.
    pub fn allow(&self) -> bool {
        self.admit().is_some()
    }

    fn admit(&self) -> Option<Admission> {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => Some(Admission::Normal),
            CircuitState::Open => {
                let timeout_elapsed = match inner.last_failure_time {
                    Some(last_failure) => last_failure.elapsed() >= self.config.reset_timeout,
                    None => {
                        warn!(
                            component = %self.name,
                            "Circuit open but no failure timestamp recorded"
                        );
                        true
                    }
                };
                if !timeout_elapsed {
                    return None;
                }
                inner.state = CircuitState::HalfOpen;
                info!(
                    component = %self.name,
                    failure_count = inner.failure_count,
                    "🟡 Circuit breaker half-open, admitting probe"
                );
                Some(Self::take_probe(&mut inner))
            }
            CircuitState::HalfOpen => {
                if inner.probe_in_flight {
                    None
                } else {
                    debug!(component = %self.name, "Admitting replacement half-open probe");
                    Some(Self::take_probe(&mut inner))
                }
            }
        }
    }

    fn take_probe(inner: &mut BreakerState) -> Admission {
        inner.probe_in_flight = true;
        inner.probe_generation = inner.probe_generation.wrapping_add(1);
        Admission::Probe(inner.probe_generation)
    }

    /// Reset to Closed with a zero failure count
    pub fn record_success(&self) {
        let mut inner = self.inner.lock();
        let previous = inner.state;
        inner.state = CircuitState::Closed;
        inner.failure_count = 0;
        inner.last_failure_time = None;
        inner.probe_in_flight = false;

        if previous != CircuitState::Closed {
            info!(
                component = %self.name,
                previous_state = %previous,
                "🟢 Circuit breaker closed (recovered)"
            );
        }
    }

    /// Count a failure, opening the circuit at the threshold or when a probe fails
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock();
        inner.failure_count = inner.failure_count.saturating_add(1);
        inner.last_failure_time = Some(Instant::now());
        inner.probe_in_flight = false;

        let should_open = match inner.state {
            CircuitState::HalfOpen => true,
            CircuitState::Closed => inner.failure_count >= self.config.max_failures,
            CircuitState::Open => false,
        };

        if should_open {
            inner.state = CircuitState::Open;
            error!(
                component = %self.name,
                failure_count = inner.failure_count,
                max_failures = self.config.max_failures,
                reset_timeout_seconds = self.config.reset_timeout.as_secs(),
                "🔴 Circuit breaker opened (failing fast)"
            );
        } else {
            debug!(
                component = %self.name,
                failure_count = inner.failure_count,
                state = %inner.state,
                "Failure recorded"
            );
        }
    }

    /// Give back the half-open probe slot held by `generation` if it is still the
    /// current probe and never reported an outcome
    fn release_probe(&self, generation: u64) {
        let mut inner = self.inner.lock();
        if inner.state == CircuitState::HalfOpen
            && inner.probe_in_flight
            && inner.probe_generation == generation
        {
            inner.probe_in_flight = false;
            warn!(component = %self.name, "Half-open probe abandoned before completion");
        }
    }

    /// Execute an operation with circuit breaker protection.
    ///
    /// `counts_as_failure` decides which errors are recorded as breaker failures; every
    /// other outcome (including errors it rejects) is recorded as a success.
    pub async fn call<F, Fut, T, E, C>(
        &self,
        counts_as_failure: C,
        operation: F,
    ) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Fn(&E) -> bool,
    {
        let Some(admission) = self.admit() else {
            debug!(component = %self.name, "Call rejected, circuit is open");
            return Err(CircuitBreakerError::CircuitOpen {
                component: self.name.clone(),
            });
        };

        let permit = CallPermit {
            breaker: self,
            admission,
            settled: false,
        };
        let result = operation().await;

        match &result {
            Err(err) if counts_as_failure(err) => permit.settle(false),
            _ => permit.settle(true),
        }

        result.map_err(CircuitBreakerError::OperationFailed)
    }

    /// Force circuit to open state
    pub fn force_open(&self) {
        let mut inner = self.inner.lock();
        inner.state = CircuitState::Open;
        inner.last_failure_time = Some(Instant::now());
        inner.probe_in_flight = false;
        warn!(component = %self.name, "🚨 Circuit breaker forced open");
    }

    /// Force circuit to closed state
    pub fn force_closed(&self) {
        warn!(component = %self.name, "🚨 Circuit breaker forced closed");
        self.record_success();
    }
}

/// Tracks an admitted call so a cancelled future cannot keep the probe slot forever
struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    admission: Admission,
    settled: bool,
}

impl CallPermit<'_> {
    fn settle(mut self, success: bool) {
        self.settled = true;
        if success {
            self.breaker.record_success();
        } else {
            self.breaker.record_failure();
        }
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if let (false, Admission::Probe(generation)) = (self.settled, self.admission) {
            self.breaker.release_probe(generation);
        }
    }
}
