// src/services/retry.rs
// DOCUMENTATION: Upstream failure classification and sequential retry runner
// PURPOSE: Shared by the provider clients and the generation service

use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single upstream attempt
/// DOCUMENTATION: The message is for logs only and never reaches a caller
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// Timeout, connection failure, 5xx, or rate-limit response
    #[error("transient upstream failure: {0}")]
    Transient(String),

    /// Bad credentials, quota, other 4xx, or an unusable response body
    #[error("upstream rejected request: {0}")]
    Rejected(String),
}

impl UpstreamFailure {
    /// Classify a non-success HTTP status
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error()
            || status == StatusCode::TOO_MANY_REQUESTS
            || status == StatusCode::REQUEST_TIMEOUT
        {
            UpstreamFailure::Transient(format!("HTTP {}", status))
        } else {
            UpstreamFailure::Rejected(format!("HTTP {}", status))
        }
    }

    /// Classify a transport-level reqwest error
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamFailure::Rejected(format!("undecodable response: {}", err))
        } else if err.is_timeout() {
            UpstreamFailure::Transient("request timed out".to_string())
        } else {
            UpstreamFailure::Transient(format!("request failed: {}", err))
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, UpstreamFailure::Transient(_))
    }
}

/// Bounded, fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay between two consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(2000))
    }
}

/// Run `operation` until it succeeds, is rejected, or attempts run out
/// DOCUMENTATION: Attempts are strictly sequential; each retry waits the full
/// policy delay. Returns the last transient failure on exhaustion.
///
/// # Arguments
/// * `policy` - attempt budget and delay
/// * `label` - upstream name used in log lines
/// * `operation` - called with the 1-based attempt number
pub async fn run_with_retries<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, UpstreamFailure>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, UpstreamFailure>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    log::info!("{} succeeded on attempt {}/{}", label, attempt, max_attempts);
                }
                return Ok(value);
            }
            Err(failure @ UpstreamFailure::Rejected(_)) => return Err(failure),
            Err(failure) if attempt >= max_attempts => return Err(failure),
            Err(failure) => {
                log::warn!(
                    "{} attempt {}/{} failed ({}), retrying in {}ms",
                    label,
                    attempt,
                    max_attempts,
                    failure,
                    policy.delay.as_millis()
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    fn quick(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_status_classification() {
        assert!(UpstreamFailure::from_status(StatusCode::SERVICE_UNAVAILABLE).is_transient());
        assert!(UpstreamFailure::from_status(StatusCode::INTERNAL_SERVER_ERROR).is_transient());
        assert!(UpstreamFailure::from_status(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(!UpstreamFailure::from_status(StatusCode::UNAUTHORIZED).is_transient());
        assert!(!UpstreamFailure::from_status(StatusCode::FORBIDDEN).is_transient());
        assert!(!UpstreamFailure::from_status(StatusCode::BAD_REQUEST).is_transient());
    }

    #[test]
    fn test_policy_never_allows_zero_attempts() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = run_with_retries(&quick(3), "test", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(UpstreamFailure::Transient("503".to_string()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(assert_ok!(result), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_transient_failure() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = run_with_retries(&quick(3), "test", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(UpstreamFailure::Transient(format!("attempt {}", attempt))) }
        })
        .await;

        assert_eq!(
            assert_err!(result),
            UpstreamFailure::Transient("attempt 3".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_rejection_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = run_with_retries(&quick(5), "test", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(UpstreamFailure::Rejected("HTTP 401".to_string())) }
        })
        .await;

        assert!(!assert_err!(result).is_transient());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_waits_full_delay_between_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_millis(25));
        let started = Instant::now();
        let _: Result<(), _> = run_with_retries(&policy, "test", |_| async {
            Err(UpstreamFailure::Transient("timeout".to_string()))
        })
        .await;

        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
