//! Webhook signature primitives.
//!
//! The provider signs each delivery with HMAC-SHA256 over the exact byte
//! sequence `"{timestamp}.{payload}"` and sends the lowercase hex digest in
//! [`SIGNATURE_HEADER`]. [`sign`] reproduces that scheme so test fixtures
//! can be generated without a live provider.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::time::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded HMAC digest of a delivery.
pub const SIGNATURE_HEADER: &str = "X-SingleKey-Signature";

/// Header carrying the sender's Unix-seconds timestamp for a delivery.
pub const TIMESTAMP_HEADER: &str = "X-SingleKey-Timestamp";

/// User agent the provider sends with deliveries. Informational only;
/// the verifier never checks it.
pub const WEBHOOK_USER_AGENT: &str = "SingleKey-Webhook/1.0";

/// Computes the lowercase hex HMAC-SHA256 digest of
/// `"{timestamp}.{payload}"`.
///
/// The timestamp goes into the MAC exactly as transmitted: signer and
/// verifier must process a byte-identical message, so no normalization
/// (parsing, reformatting) happens here.
#[must_use]
pub fn compute_signature(secret: &[u8], timestamp: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compares two hex digests in constant time.
///
/// Length disagreement is resolved inside the comparison primitive rather
/// than by an early return, so timing does not reveal where the strings
/// diverge.
pub(crate) fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// A signature/timestamp pair matching the verifier's expectations.
///
/// Produced by [`sign`] and [`sign_now`]; the fields correspond to
/// [`SIGNATURE_HEADER`] and [`TIMESTAMP_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Lowercase hex HMAC-SHA256 digest.
    pub signature: String,
    /// Decimal Unix-seconds timestamp that was signed.
    pub timestamp: String,
}

/// Signs a payload with the given secret and timestamp.
///
/// Pure: the same inputs always produce the same pair, which
/// round-trips through [`WebhookVerifier::verify`] with the same secret.
///
/// [`WebhookVerifier::verify`]: super::WebhookVerifier::verify
#[must_use]
pub fn sign(secret: &str, payload: &str, timestamp: i64) -> SignedPayload {
    let timestamp = timestamp.to_string();
    let signature = compute_signature(secret.as_bytes(), &timestamp, payload);
    SignedPayload {
        signature,
        timestamp,
    }
}

/// Signs a payload with the current Unix time as the timestamp.
#[must_use]
pub fn sign_now(secret: &str, payload: &str) -> SignedPayload {
    sign(secret, payload, SystemClock.unix_secs())
}
