// ABOUTME: Shared bounded-polling primitive for rollout stability.
// ABOUTME: Both strategies derive their attempt ceilings from the same clamp and delay arithmetic.

use std::future::Future;
use std::time::Duration;

use super::error::DeployError;

/// Fixed delay between status polls.
pub const POLL_DELAY: Duration = Duration::from_secs(15);

/// Global ceiling on any wait budget, in minutes (6 hours).
pub const MAX_WAIT_MINUTES: u64 = 360;

/// Clamp a wait budget to the global ceiling.
pub fn clamp_minutes(minutes: u64) -> u64 {
    minutes.min(MAX_WAIT_MINUTES)
}

/// Convert a minute budget into a poll-attempt ceiling at the fixed delay.
pub fn attempts_for(minutes: u64) -> u32 {
    (clamp_minutes(minutes) * 60 / POLL_DELAY.as_secs()) as u32
}

/// Poll `check` every `delay` until it reports true, failing with a timeout
/// once `max_attempts` polls have come back false.
///
/// This is the single polling primitive both deployment strategies share, so
/// the timeout arithmetic and failure text cannot drift between them. It has
/// no side effects beyond the status queries the caller's `check` performs.
pub async fn wait_until<F, Fut>(
    condition: &str,
    delay: Duration,
    max_attempts: u32,
    mut check: F,
) -> Result<(), DeployError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, DeployError>>,
{
    for attempt in 1..=max_attempts {
        if check().await? {
            tracing::debug!("{condition} reached after {attempt} attempt(s)");
            return Ok(());
        }
        if attempt < max_attempts {
            tokio::time::sleep(delay).await;
        }
    }
    Err(DeployError::Timeout {
        condition: condition.to_string(),
        attempts: max_attempts,
    })
}
