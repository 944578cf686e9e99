//! # Retry Policy
//!
//! Bounded exponential backoff around any fallible async operation. Attempt `n`
//! (counting from zero) that fails with a retriable error sleeps
//! `backoff_factor * 2^n` seconds before the next attempt. The sleep is a tokio timer,
//! so only the calling task is suspended.

use crate::resilience::RetryConfig;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a retried operation that did not succeed
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    /// Every attempt failed with a retriable error
    #[error("[{operation}] Max retry attempts exceeded after {attempts} attempts: {last_error}")]
    Exhausted {
        operation: String,
        attempts: u32,
        last_error: E,
    },

    /// A non-retriable error stopped the loop immediately
    #[error("{0}")]
    Aborted(E),
}

impl<E> RetryError<E> {
    /// The error produced by the last attempt
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Exhausted { last_error, .. } => last_error,
            RetryError::Aborted(err) => err,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    retries: u32,
    backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff_factor: f64) -> Self {
        Self {
            retries,
            backoff_factor,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.retries, config.backoff_factor)
    }

    /// Single attempt, no backoff
    pub fn disabled() -> Self {
        Self::new(0, 0.0)
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    /// Delay slept after the failed attempt with the given zero-based index
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.backoff_factor * 2f64.powi(exponent);
        if !secs.is_finite() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Run `operation` until it succeeds, fails with a non-retriable error, or the
    /// retry budget is spent. The operation is invoked at most `retries + 1` times.
    pub async fn run<F, Fut, T, E, P>(
        &self,
        operation: &str,
        is_retriable: P,
        mut call: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: fmt::Display,
    {
        let mut attempt: u32 = 0;
        loop {
            match call().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(
                            operation,
                            attempts = attempt + 1,
                            "Operation succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(err) if !is_retriable(&err) => return Err(RetryError::Aborted(err)),
                Err(err) => {
                    if attempt >= self.retries {
                        warn!(
                            operation,
                            attempts = attempt + 1,
                            error = %err,
                            "Retry budget exhausted"
                        );
                        return Err(RetryError::Exhausted {
                            operation: operation.to_string(),
                            attempts: attempt + 1,
                            last_error: err,
                        });
                    }

                    let delay = self.delay_for(attempt);
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
