//! Opt-in retry with exponential backoff
//!
//! Client calls never retry on their own: a [`Error::RateLimited`] or a
//! timeout surfaces to the caller unchanged. Callers that want a backoff
//! policy wrap the call in [`with_retry`].
//!
//! # Example
//!
//! ```no_run
//! use lta_datamall::{Config, DataMallClient};
//! use lta_datamall::config::RetryConfig;
//! use lta_datamall::retry::with_retry;
//!
//! # async fn example() -> lta_datamall::Result<()> {
//! let client = DataMallClient::new(Config::default())?;
//! client.configure("my-account-key").await;
//!
//! let stops = with_retry(&RetryConfig::default(), || client.bus_stops()).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Classifies errors as transient (worth retrying) or permanent
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimited => true,
            Error::Network(e) => e.is_timeout() || e.is_connect(),
            Error::Http { status, .. } => matches!(status, 502..=504),
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            Error::NoApiKey
            | Error::InvalidUrl(_)
            | Error::DecodingFailed(_)
            | Error::MissingDownloadLink
            | Error::Config { .. }
            | Error::Archive(_) => false,
        }
    }
}

/// Run `operation`, retrying transient failures with exponential backoff
///
/// Makes at most `config.max_attempts + 1` calls. The delay starts at
/// `initial_delay`, is multiplied by `backoff_multiplier` after every retry
/// and capped at `max_delay`. With `jitter` each wait is stretched by a
/// random factor in `[1, 2]`.
///
/// Returns the first success, the first permanent error, or the last
/// transient error once attempts are exhausted.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "request succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                attempt += 1;
                let wait = if config.jitter { add_jitter(delay) } else { delay };

                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = wait.as_millis(),
                    "request failed, retrying"
                );

                tokio::time::sleep(wait).await;
                delay = Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier)
                    .min(config.max_delay);
            }
            Err(e) => {
                tracing::debug!(error = %e, attempts = attempt + 1, "giving up");
                return Err(e);
            }
        }
    }
}

/// Stretch `delay` by a uniform random factor in `[1, 2]`
fn add_jitter(delay: Duration) -> Duration {
    let factor: f64 = rand::thread_rng().gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + factor))
}
