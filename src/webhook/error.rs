//! Error types for webhook verification and decoding.

use thiserror::Error;

/// Error type for webhook verification and decoding.
///
/// Every failure mode a delivery can hit before it reaches a handler.
/// Nothing here is retryable: a rejected delivery stays rejected, and the
/// provider redelivers on its own schedule when the endpoint returns a
/// non-2xx status.
///
/// Recommended HTTP mapping for integrators (not enforced here):
/// authentication failures ([`is_authentication_failure`]) map to 401,
/// [`Payload`] to 400.
///
/// [`is_authentication_failure`]: WebhookError::is_authentication_failure
/// [`Payload`]: WebhookError::Payload
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Verification was required but no signing secret is configured.
    ///
    /// This is a setup problem on the caller's side, deliberately distinct
    /// from a failed verification: "not configured" must never be read as
    /// "invalid signature".
    #[error("No webhook secret configured; cannot verify deliveries")]
    MissingSecret,

    /// The timestamp header is not a base-10 integer.
    #[error("Webhook timestamp '{value}' is not a valid Unix timestamp")]
    InvalidTimestamp {
        /// The header value as received.
        value: String,
    },

    /// The claimed timestamp falls outside the tolerance window.
    ///
    /// Either a replayed delivery or serious clock skew; callers may want
    /// to alert on it, but must not retry with a relaxed window.
    #[error(
        "Webhook timestamp {claimed} is outside the {tolerance_secs}s tolerance window (now: {now})"
    )]
    Stale {
        /// Unix seconds claimed by the sender.
        claimed: i64,
        /// Unix seconds observed by the verifier.
        now: i64,
        /// Configured tolerance in seconds.
        tolerance_secs: u64,
    },

    /// The computed digest does not match the supplied signature.
    ///
    /// An authentication failure: the payload was not signed with the
    /// configured secret, or was altered in transit.
    #[error("Webhook signature does not match the payload")]
    SignatureMismatch,

    /// The payload is not a well-formed event.
    ///
    /// Covers malformed JSON, a known event tag with mismatched `data`
    /// fields, and semantically inconsistent payloads.
    #[error("Malformed webhook payload: {message}")]
    Payload {
        /// What was wrong with the payload.
        message: String,
        /// Underlying deserialization error, when there is one.
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl WebhookError {
    /// Builds a [`Payload`](Self::Payload) error from a deserialization
    /// failure.
    pub(crate) fn payload(source: serde_json::Error) -> Self {
        Self::Payload {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Builds a [`Payload`](Self::Payload) error from a consistency check.
    pub(crate) fn inconsistent(message: String) -> Self {
        Self::Payload {
            message,
            source: None,
        }
    }

    /// Returns true for failures that should be treated as authentication
    /// rejections (401-equivalent at an HTTP boundary): missing secret,
    /// bad or stale timestamp, or a signature mismatch.
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        !matches!(self, Self::Payload { .. })
    }
}
