// SPDX-License-Identifier: MPL-2.0
//! Waiting for a resized artifact to appear in storage.
//!
//! The resize worker gives no completion signal. After the upload succeeds
//! the caller waits a settling delay, then polls the [`ArtifactSource`] with a
//! doubling backoff until the artifact is found, a non-retryable error
//! occurs, or the attempt budget runs out.

use crate::application::port::ArtifactSource;
use crate::domain::upload::{ArtifactRef, RetrievedArtifact};
use crate::error::RunError;
use std::time::Duration;

/// How long and how often to look for an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwaitPolicy {
    /// Delay before the first fetch.
    pub settle_delay: Duration,
    /// Total number of fetches, including the first one. At least 1.
    pub max_attempts: u32,
    /// Pause after the first "not ready" answer.
    pub initial_backoff: Duration,
    /// Upper bound of the doubled pause.
    pub max_backoff: Duration,
}

impl AwaitPolicy {
    #[must_use]
    pub fn new(
        settle_delay: Duration,
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
    ) -> Self {
        Self {
            settle_delay,
            max_attempts: max_attempts.max(1),
            initial_backoff,
            max_backoff: max_backoff.max(initial_backoff),
        }
    }

    /// Returns the pause preceding attempt `attempt + 1`.
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for AwaitPolicy {
    fn default() -> Self {
        use crate::app::config::{
            DEFAULT_MAX_FETCH_ATTEMPTS, DEFAULT_MAX_RETRY_BACKOFF_MS, DEFAULT_RETRY_BACKOFF_MS,
            DEFAULT_SETTLE_DELAY_SECS,
        };
        Self::new(
            Duration::from_secs(u64::from(DEFAULT_SETTLE_DELAY_SECS)),
            DEFAULT_MAX_FETCH_ATTEMPTS,
            Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            Duration::from_millis(DEFAULT_MAX_RETRY_BACKOFF_MS),
        )
    }
}

/// Waits for the artifact behind `artifact` according to `policy`.
///
/// # Errors
///
/// Returns [`RunError::ArtifactUnavailable`] if the artifact is still missing
/// after the last attempt or a fetch fails for a non-retryable reason.
pub async fn await_artifact<S>(
    source: &S,
    artifact: &ArtifactRef,
    policy: &AwaitPolicy,
) -> Result<RetrievedArtifact, RunError>
where
    S: ArtifactSource,
{
    if !policy.settle_delay.is_zero() {
        tokio::time::sleep(policy.settle_delay).await;
    }

    let mut attempt = 1;
    loop {
        match source.fetch(artifact).await {
            Ok(retrieved) => {
                tracing::info!(
                    url = artifact.url(),
                    attempt,
                    size = retrieved.size(),
                    "resized artifact retrieved"
                );
                return Ok(retrieved);
            }
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                let pause = policy.backoff_after(attempt);
                tracing::debug!(
                    url = artifact.url(),
                    attempt,
                    error = %err,
                    ?pause,
                    "artifact not ready, retrying"
                );
                tokio::time::sleep(pause).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::warn!(url = artifact.url(), attempt, error = %err, "giving up on artifact");
                return Err(RunError::ArtifactUnavailable {
                    message: err.to_string(),
                });
            }
        }
    }
}
