use crate::services::reasoning::{ReasoningError, ReasoningService};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Bounded exponential backoff for rate-limited calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): 2s, 4s, 8s with defaults
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Waits between attempts; swapped for a recording fake in tests
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Reasoning service decorator that retries rate-limited calls
///
/// Only [`ReasoningError::RateLimited`] is retried. Quota exhaustion and every
/// other error return on the first attempt so the caller can fall back at once.
pub struct Retrying<S> {
    inner: S,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl<S> Retrying<S> {
    pub fn new(inner: S, policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            inner,
            policy,
            sleeper,
        }
    }

    pub fn with_default_policy(inner: S) -> Self {
        Self::new(inner, RetryPolicy::default(), Arc::new(TokioSleeper))
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl<S: ReasoningService> ReasoningService for Retrying<S> {
    async fn complete(&self, prompt: &str) -> Result<String, ReasoningError> {
        let mut attempt = 0;

        loop {
            match self.inner.complete(prompt).await {
                Err(ReasoningError::RateLimited(message)) if attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        "Reasoning service rate limited ({}), retry {}/{} in {:?}",
                        message,
                        attempt + 1,
                        self.policy.max_retries,
                        delay
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
