//! Polling with exponential backoff and cancellation support.
//!
//! Provides a generic abstraction for waiting on a stack (or any async
//! condition) to settle, with configurable exponential backoff, jitter,
//! timeout, and cancellation.

use anyhow::Result;
use backon::{BackoffBuilder, ExponentialBuilder};
use stackdown_common::defaults::DEFAULT_WAIT_TIMEOUT_SECS;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Configuration for polling with exponential backoff.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// Initial delay between checks
    pub initial_delay: Duration,
    /// Maximum delay between checks (cap for exponential growth)
    pub max_delay: Duration,
    /// Maximum total time to wait before timeout
    pub timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
        }
    }
}

/// Poll `check` until it yields a value.
///
/// # Arguments
/// * `config` - Wait configuration
/// * `cancel` - Optional cancellation token
/// * `check` - Async function returning `Ok(Some(value))` when done,
///   `Ok(None)` to retry
/// * `resource_name` - Name for logging
///
/// # Returns
/// * `Ok(value)` - The check produced a value
/// * `Err` - Timeout, cancelled, or the check returned an error
///
/// # Example
/// ```ignore
/// let status = wait_for_resource(
///     WaitConfig::default(),
///     Some(&cancel_token),
///     || async { Ok(describe().await?.filter(|s| s.is_terminal())) },
///     "my-stack",
/// ).await?;
/// ```
pub async fn wait_for_resource<T, F, Fut>(
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
    check: F,
    resource_name: &str,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = std::time::Instant::now();
    let mut attempts = 0u32;

    let mut delays = ExponentialBuilder::default()
        .with_min_delay(config.initial_delay)
        .with_max_delay(config.max_delay)
        .with_factor(2.0)
        .with_jitter()
        .without_max_times()
        .build();

    loop {
        attempts += 1;

        if let Some(token) = cancel {
            if token.is_cancelled() {
                anyhow::bail!("Wait for {} cancelled", resource_name);
            }
        }

        if start.elapsed() >= config.timeout {
            anyhow::bail!(
                "Timeout waiting for {} after {:?} ({} attempts)",
                resource_name,
                config.timeout,
                attempts
            );
        }

        match check().await {
            Ok(Some(value)) => {
                debug!(resource = %resource_name, attempts, "Resource settled");
                return Ok(value);
            }
            Ok(None) => {
                let delay = delays.next().unwrap_or(config.max_delay);
                debug!(
                    resource = %resource_name,
                    attempt = attempts,
                    delay_ms = delay.as_millis(),
                    "Resource not settled, retrying"
                );

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = async {
                        if let Some(token) = cancel {
                            token.cancelled().await
                        } else {
                            std::future::pending::<()>().await
                        }
                    } => {
                        anyhow::bail!("Wait for {} cancelled", resource_name);
                    }
                }
            }
            Err(e) => {
                warn!(resource = %resource_name, error = ?e, "Resource check failed");
                return Err(e);
            }
        }
    }
}
