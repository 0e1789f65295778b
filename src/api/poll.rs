//! Report completion polling.
//!
//! Screenings finish minutes after submission. Callers that cannot (or
//! do not want to) receive webhooks can poll the screening until its
//! status is terminal.

use std::time::Duration;

use super::error::ApiError;
use super::http::HttpClient;
use super::screenings::SingleKey;
use crate::screening::Screening;
use crate::time::{Sleeper, TokioSleeper};

/// Configuration for status polling.
///
/// Bounds both the pace (`interval`) and the total budget
/// (`max_checks`); with the defaults a screening gets 15 minutes to
/// reach a terminal status.
///
/// # Example
///
/// ```
/// use singlekey::api::PollPolicy;
/// use std::time::Duration;
///
/// let policy = PollPolicy::new()
///     .with_interval(Duration::from_secs(10))
///     .with_max_checks(60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive status checks.
    pub interval: Duration,
    /// Maximum number of status checks (including the first).
    pub max_checks: u32,
}

impl PollPolicy {
    /// Default delay between checks (5 seconds).
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    /// Default check budget (180 checks = 15 minutes at the default
    /// interval).
    pub const DEFAULT_MAX_CHECKS: u32 = 180;

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            max_checks: Self::DEFAULT_MAX_CHECKS,
        }
    }

    /// Sets the delay between checks.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the check budget.
    ///
    /// # Panics
    ///
    /// Panics if `max_checks` is zero.
    #[must_use]
    pub const fn with_max_checks(mut self, max_checks: u32) -> Self {
        assert!(max_checks >= 1, "max_checks must be at least 1");
        self.max_checks = max_checks;
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HttpClient> SingleKey<H> {
    /// Polls a screening until it reaches a terminal status.
    ///
    /// Returns the first snapshot whose status is `completed` or
    /// `failed`. Transport and API errors end the wait immediately; the
    /// SDK does not retry them.
    ///
    /// # Errors
    ///
    /// [`ApiError::PollTimeout`] when the budget runs out, or any error
    /// from [`get_screening`](Self::get_screening).
    pub async fn wait_for_completion(
        &self,
        purchase_token: &str,
        policy: &PollPolicy,
    ) -> Result<Screening, ApiError> {
        self.wait_for_completion_with(purchase_token, policy, &TokioSleeper)
            .await
    }

    /// Polls with a caller-supplied [`Sleeper`].
    ///
    /// Lets tests run the full loop without real delays.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_completion`](Self::wait_for_completion).
    pub async fn wait_for_completion_with<S: Sleeper>(
        &self,
        purchase_token: &str,
        policy: &PollPolicy,
        sleeper: &S,
    ) -> Result<Screening, ApiError> {
        for check in 1..=policy.max_checks {
            let screening = self.get_screening(purchase_token).await?;
            if screening.status.is_terminal() {
                return Ok(screening);
            }

            tracing::debug!(
                purchase_token,
                status = %screening.status,
                check,
                "screening not finished yet"
            );

            // No sleep after the final check
            if check < policy.max_checks {
                sleeper.sleep(policy.interval).await;
            }
        }

        Err(ApiError::PollTimeout {
            purchase_token: purchase_token.to_string(),
            checks: policy.max_checks,
        })
    }
}
