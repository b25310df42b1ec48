//! Bounded retrieval
//!
//! A send or publish returns before the listener has applied the message,
//! so a caller that expects a particular configuration has to poll. These
//! helpers poll a store until a condition holds, always under a caller
//! supplied time bound.
//!
//! # Example
//!
//! ```ignore
//! let policy = RetryPolicy::new(Duration::from_millis(10), Duration::from_secs(2));
//! bus.publish(&address, payload).await;
//! let config = await_non_empty(&store, &policy).await?;
//! ```

use shared_types::ConfigValue;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::debug;

use crate::error::StoreError;
use crate::ports::inbound::ConfigStore;

/// How often and for how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between reads
    pub interval: Duration,
    /// Give up after this long
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Read `store` until `predicate` accepts the configuration.
///
/// # Errors
///
/// - `StoreError::Timeout` if the bound elapses first
/// - any error returned by a read (e.g. the store was closed)
pub async fn await_configuration<S, P>(
    store: &S,
    policy: &RetryPolicy,
    mut predicate: P,
) -> Result<ConfigValue, StoreError>
where
    S: ConfigStore + ?Sized,
    P: FnMut(&ConfigValue) -> bool + Send,
{
    let poll = async {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            let config = store.get_configuration().await?;
            if predicate(&config) {
                debug!(attempts = attempts, "Expected configuration observed");
                return Ok::<_, StoreError>(config);
            }
            sleep(policy.interval).await;
        }
    };

    timeout(policy.timeout, poll)
        .await
        .map_err(|_| StoreError::Timeout {
            waited: policy.timeout,
        })?
}

/// Read `store` until it holds any non-empty configuration.
pub async fn await_non_empty<S>(store: &S, policy: &RetryPolicy) -> Result<ConfigValue, StoreError>
where
    S: ConfigStore + ?Sized,
{
    await_configuration(store, policy, |config| !config.is_empty()).await
}

/// Read `store` until it holds exactly `expected`.
pub async fn await_value<S>(
    store: &S,
    policy: &RetryPolicy,
    expected: &ConfigValue,
) -> Result<ConfigValue, StoreError>
where
    S: ConfigStore + ?Sized,
{
    await_configuration(store, policy, |config| config == expected).await
}
