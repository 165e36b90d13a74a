use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Delays between attempts. The number of attempts is `delays.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    /// 1s, 2s: a chat reply is waiting on the result.
    fn default() -> Self {
        Self::from_secs(&[1, 2])
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_secs(delays: &[u64]) -> Self {
        Self {
            delays: delays.iter().copied().map(Duration::from_secs).collect(),
        }
    }

    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.delays.len() + 1
    }
}

/// Retry an async operation, sleeping per the policy between failures.
///
/// Returns the first success, the first error `should_retry` rejects, or the
/// error of the final attempt.
pub async fn retry_with_backoff<F, Fut, T, E, P>(
    mut operation: F,
    policy: &RetryPolicy,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    let total = policy.attempts();

    for (i, delay) in policy.delays.iter().enumerate() {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if !should_retry(&e) => {
                warn!("Request failed (attempt {}/{total}): {e}. Not retrying", i + 1);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "Request failed (attempt {}/{total}): {e}. Retrying after {}ms...",
                    i + 1,
                    delay.as_millis()
                );
                sleep(*delay).await;
            }
        }
    }

    operation().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn instant(retries: usize) -> RetryPolicy {
        RetryPolicy {
            delays: vec![Duration::ZERO; retries],
        }
    }

    #[tokio::test]
    async fn retry_succeeds_on_first_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), String>(())
                }
            },
            &instant(2),
            |_| true,
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_succeeds_after_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if count < 3 {
                        Err(String::from("fail"))
                    } else {
                        Ok(())
                    }
                }
            },
            &instant(2),
            |_| true,
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_returns_last_error_after_all_attempts() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(format!("fail {n}"))
                }
            },
            &instant(2),
            |_| true,
        )
        .await;
        assert_eq!(result, Err(String::from("fail 3")));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn no_retries_means_single_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let _ = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>("fail")
                }
            },
            &RetryPolicy::from_secs(&[]),
            |_| true,
        )
        .await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_error_is_not_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(String::from("unauthorized"))
                }
            },
            &instant(2),
            |e: &String| e != "unauthorized",
        )
        .await;
        assert_eq!(result, Err(String::from("unauthorized")));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
