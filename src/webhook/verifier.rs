//! Webhook signature verification.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use super::error::WebhookError;
use super::event::WebhookEvent;
use super::signature::{compute_signature, signatures_match};
use crate::time::{Clock, SystemClock};

/// Default tolerance between the sender's claimed timestamp and this
/// host's clock (5 minutes).
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Verifies and decodes inbound webhook deliveries.
///
/// Holds the signing secret (never logged, never serialized; `Debug`
/// output is redacted) and the tolerance window used by the replay guard.
/// Each call is independent and safe to issue concurrently from multiple
/// tasks; the secret is read-only after construction.
///
/// # Type Parameters
///
/// * `C` - The [`Clock`] used for freshness checks (defaults to
///   [`SystemClock`]). Tests inject a pinned clock to make the staleness
///   boundary deterministic.
///
/// # Example
///
/// ```
/// use singlekey::webhook::{WebhookVerifier, sign_now};
///
/// let verifier = WebhookVerifier::new("whsec_live_123");
///
/// // The provider signs "{timestamp}.{payload}"; `sign_now` reproduces it.
/// let payload = r#"{"event":"invite.sent","timestamp":"2024-01-01T00:00:00Z","webhook_id":"wh_1","api_version":"1.0","data":{}}"#;
/// let signed = sign_now("whsec_live_123", payload);
///
/// assert!(verifier.verify(payload, &signed.signature, &signed.timestamp).unwrap());
/// ```
#[derive(Debug)]
pub struct WebhookVerifier<C = SystemClock> {
    secret: Option<SecretString>,
    tolerance: Duration,
    clock: C,
}

impl WebhookVerifier<SystemClock> {
    /// Creates a verifier with the given signing secret and the default
    /// 300-second tolerance window.
    #[must_use]
    pub fn new(secret: impl Into<SecretString>) -> Self {
        Self {
            secret: Some(secret.into()),
            tolerance: DEFAULT_TOLERANCE,
            clock: SystemClock,
        }
    }

    /// Creates a verifier with NO signing secret.
    ///
    /// This disables authenticity checks entirely: [`decode`] parses
    /// payloads without verifying them, and [`verify`] always fails with
    /// [`WebhookError::MissingSecret`]. Only use this when the provider
    /// has not issued a webhook secret yet (e.g. sandbox experiments) and
    /// the endpoint is not reachable from the open internet.
    ///
    /// [`decode`]: Self::decode
    /// [`verify`]: Self::verify
    #[must_use]
    pub fn unverified() -> Self {
        Self {
            secret: None,
            tolerance: DEFAULT_TOLERANCE,
            clock: SystemClock,
        }
    }
}

impl<C> WebhookVerifier<C> {
    /// Sets the tolerance window for the replay guard.
    ///
    /// Immutable after construction; there is deliberately no way to
    /// relax the window on an already-built verifier.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces the clock used for freshness checks.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> WebhookVerifier<C2> {
        WebhookVerifier {
            secret: self.secret,
            tolerance: self.tolerance,
            clock,
        }
    }

    /// Returns the configured tolerance window.
    #[must_use]
    pub const fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Returns true when a signing secret is configured.
    #[must_use]
    pub const fn is_authenticating(&self) -> bool {
        self.secret.is_some()
    }
}

impl<C: Clock> WebhookVerifier<C> {
    /// Verifies a delivery's signature.
    ///
    /// Checks run in order: timestamp format, freshness, digest. The
    /// clock is sampled exactly once per call, so a verification cannot
    /// straddle the tolerance boundary mid-check, and no digest work
    /// happens for a delivery that is already known to be stale. The
    /// digest comparison is constant-time.
    ///
    /// Returns `Ok(false)` only for a well-formed delivery whose digest
    /// does not match; every other problem is a typed error.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::MissingSecret`] when no secret is configured
    /// - [`WebhookError::InvalidTimestamp`] when `timestamp` is not a
    ///   base-10 integer
    /// - [`WebhookError::Stale`] when the claimed timestamp is outside
    ///   the tolerance window
    pub fn verify(
        &self,
        payload: &str,
        signature: &str,
        timestamp: &str,
    ) -> Result<bool, WebhookError> {
        let secret = self.secret.as_ref().ok_or(WebhookError::MissingSecret)?;

        let claimed: i64 = timestamp
            .parse()
            .map_err(|_| WebhookError::InvalidTimestamp {
                value: timestamp.to_string(),
            })?;

        let now = self.clock.unix_secs();
        self.check_freshness(now, claimed)?;

        // The raw header string goes into the MAC: the sender signed those
        // exact bytes, not our parsed representation of them.
        let expected = compute_signature(secret.expose_secret().as_bytes(), timestamp, payload);
        Ok(signatures_match(&expected, signature))
    }

    /// Verifies and decodes a delivery in one step.
    ///
    /// With a secret configured, verification runs BEFORE parsing: a
    /// payload that fails authentication is rejected as
    /// [`WebhookError::SignatureMismatch`] even when it is also malformed
    /// JSON, so unauthenticated senders learn nothing about how the body
    /// is parsed. Without a secret (see [`unverified`]) the payload is
    /// parsed directly.
    ///
    /// # Errors
    ///
    /// Any [`WebhookError`] from [`verify`], [`SignatureMismatch`] for a
    /// digest mismatch, or [`Payload`] for a body that fails to decode
    /// after authentication.
    ///
    /// [`unverified`]: WebhookVerifier::unverified
    /// [`verify`]: Self::verify
    /// [`SignatureMismatch`]: WebhookError::SignatureMismatch
    /// [`Payload`]: WebhookError::Payload
    pub fn decode(
        &self,
        payload: &str,
        signature: &str,
        timestamp: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        if self.is_authenticating() && !self.verify(payload, signature, timestamp)? {
            return Err(WebhookError::SignatureMismatch);
        }
        WebhookEvent::from_json(payload)
    }

    /// Replay guard: accepted iff `|now - claimed| <= tolerance`,
    /// inclusive on both boundaries.
    fn check_freshness(&self, now: i64, claimed: i64) -> Result<(), WebhookError> {
        if now.abs_diff(claimed) > self.tolerance.as_secs() {
            return Err(WebhookError::Stale {
                claimed,
                now,
                tolerance_secs: self.tolerance.as_secs(),
            });
        }
        Ok(())
    }
}
