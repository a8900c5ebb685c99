use std::time::Duration;

use configs::RemoteServiceConfig;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::error::ClientError;

const BACKOFF_MAX: Duration = Duration::from_secs(2);

/// Exponential backoff for remote calls. The coordinator itself never retries.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration, backoff_max: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), backoff_base, backoff_max }
    }

    /// `retries` extra attempts after the first one.
    pub fn from_config(cfg: &RemoteServiceConfig) -> Self {
        Self::new(cfg.retries.saturating_add(1), Duration::from_millis(cfg.backoff_ms), BACKOFF_MAX)
    }

    pub fn max_attempts(&self) -> u32 { self.max_attempts }

    /// Delay before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.backoff_base.saturating_mul(factor).min(self.backoff_max)
    }

    pub async fn wait_before_retry(&self, attempt: u32) {
        let backoff = self.backoff(attempt);
        debug!("Retrying in {:?} (attempt {})", backoff, attempt);
        sleep(backoff).await;
    }
}

pub async fn retry_with_policy<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("Operation succeeded after {} retries", attempt);
                }
                return Ok(result);
            }
            Err(error) => {
                attempt += 1;
                if attempt >= policy.max_attempts() || !error.is_transient() {
                    return Err(error);
                }
                warn!("Operation failed on attempt {}: {}", attempt, error);
                policy.wait_before_retry(attempt).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_retry_policy_success_after_retries() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = retry_with_policy(&fast(3), || {
            let counter = counter_clone.clone();
            async move {
                let count = counter.fetch_add(1, Ordering::SeqCst);
                if count < 2 { Err(ClientError::Timeout) } else { Ok(42) }
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_policy_max_attempts_reached() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<i32, _> = retry_with_policy(&fast(2), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Status(503))
            }
        })
        .await;

        assert_eq!(result, Err(ClientError::Status(503)));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rejections_are_not_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<i32, _> = retry_with_policy(&fast(5), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Status(403))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn backoff_grows_and_caps() {
        let p = RetryPolicy::new(5, Duration::from_millis(100), Duration::from_millis(300));
        assert_eq!(p.backoff(1), Duration::from_millis(100));
        assert_eq!(p.backoff(2), Duration::from_millis(200));
        assert_eq!(p.backoff(3), Duration::from_millis(300));
        let cfg = RemoteServiceConfig::new("http://x");
        assert_eq!(RetryPolicy::from_config(&cfg).max_attempts(), 4);
    }
}
