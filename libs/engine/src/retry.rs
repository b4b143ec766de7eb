use std::future::Future;
use std::time::Duration;

use crate::error::IndexerError;

/// Exponential backoff: the delay doubles after every failed attempt, up to `max`.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self { initial: Duration::from_secs(1), max: Duration::from_secs(30) }
    }
}

impl Backoff {
    pub fn next(&self, delay: Duration) -> Duration {
        delay.saturating_mul(2).min(self.max)
    }
}

/// Runs `op` until it succeeds or fails with a non-transient error. Never gives up on
/// transient ones.
pub async fn retry_transient<T, F, Fut>(
    backoff: &Backoff,
    what: &str,
    mut op: F,
) -> Result<T, IndexerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IndexerError>>,
{
    let mut delay = backoff.initial;
    loop {
        match op().await {
            Err(e) if e.is_transient() => {
                tracing::warn!("{what} failed: {e}, retrying in {delay:?}");
                tokio::time::sleep(delay).await;
                delay = backoff.next(delay);
            }
            result => return result,
        }
    }
}
