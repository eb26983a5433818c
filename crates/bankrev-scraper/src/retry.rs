//! Retry with exponential back-off and jitter for the reviews client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Non-transient errors are
//! returned immediately so a bad app id or a malformed body never burns the
//! retry budget.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - [`ScraperError::RateLimited`] — the server asked us to back off.
/// - HTTP 5xx responses: transient server/infrastructure errors.
///
/// **Not retriable (returned immediately):**
/// - [`ScraperError::NotFound`] — retrying returns the same 404.
/// - 4xx [`ScraperError::UnexpectedStatus`] — request-side problem.
/// - [`ScraperError::Deserialize`] / [`ScraperError::Normalization`] —
///   malformed data; retrying won't fix it.
/// - [`ScraperError::PaginationLimit`] / [`ScraperError::InvalidBaseUrl`] —
///   configuration or guard conditions.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ScraperError::RateLimited { .. } => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        ScraperError::NotFound { .. }
        | ScraperError::Deserialize { .. }
        | ScraperError::Normalization { .. }
        | ScraperError::PaginationLimit { .. }
        | ScraperError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors.
///
/// Back-off schedule with `backoff_base_secs = 1`:
///
/// | Attempt | Sleep before next attempt  |
/// |---------|----------------------------|
/// | 1       | 1 s × 2⁰ ± 25 % jitter    |
/// | 2       | 1 s × 2¹ ± 25 % jitter    |
/// | 3       | 1 s × 2² ± 25 % jitter    |
///
/// Delay is capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let base_ms = backoff_base_secs.saturating_mul(1_000);
                let computed = base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient store error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize_err() -> ScraperError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        ScraperError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    #[test]
    fn not_found_is_not_retriable() {
        assert!(!is_retriable(&ScraperError::NotFound {
            url: "http://example.com".to_owned()
        }));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
    }

    #[test]
    fn normalization_error_is_not_retriable() {
        assert!(!is_retriable(&ScraperError::Normalization {
            review_id: "gp:1".to_owned(),
            reason: "empty content".to_owned(),
        }));
    }

    #[test]
    fn rate_limited_is_retriable() {
        assert!(is_retriable(&ScraperError::RateLimited {
            app_id: "com.example.app".to_owned(),
            retry_after_secs: 30,
        }));
    }

    #[test]
    fn server_error_status_is_retriable_client_error_is_not() {
        assert!(is_retriable(&ScraperError::UnexpectedStatus {
            status: 503,
            url: "http://example.com".to_owned(),
        }));
        assert!(!is_retriable(&ScraperError::UnexpectedStatus {
            status: 403,
            url: "http://example.com".to_owned(),
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ScraperError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(ScraperError::NotFound {
                    url: "http://example.com/reviews".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "404 must not be retried");
        assert!(matches!(result, Err(ScraperError::NotFound { .. })));
    }

    #[tokio::test]
    async fn retries_rate_limited_then_succeeds() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err::<u32, _>(ScraperError::RateLimited {
                        app_id: "com.example.app".to_owned(),
                        retry_after_secs: 1,
                    })
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99, "should succeed after retries");
        assert_eq!(
            calls.load(Ordering::SeqCst),
            3,
            "should have been called 3 times (2 failures + 1 success)"
        );
    }

    #[tokio::test]
    async fn exhausts_retry_budget_and_returns_last_error() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(ScraperError::UnexpectedStatus {
                    status: 502,
                    url: "http://example.com".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            3,
            "1 initial attempt + 2 retries"
        );
        assert!(matches!(
            result,
            Err(ScraperError::UnexpectedStatus { status: 502, .. })
        ));
    }
}
