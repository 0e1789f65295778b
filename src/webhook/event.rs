//! Webhook event model and payload decoding.
//!
//! Deliveries decode in two steps: the common envelope first, then the
//! `data` object directed by the `event` tag. Tags this SDK does not know
//! decode to [`EventData::Unknown`] with the raw JSON preserved, so new
//! provider-side event types never break a consumer.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::error::WebhookError;
use crate::screening::{
    Cost, Links, Payment, Person, Property, ScreeningRef, ScreeningResult, ScreeningStatus,
};

/// The six event types this SDK knows how to decode and dispatch.
///
/// [`WebhookEvent::kind`] returns `None` for tags outside this set; such
/// events still decode (see [`EventData::Unknown`]) but cannot be routed
/// to a typed handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `screening.completed`: report is ready.
    ScreeningCompleted,
    /// `screening.submitted`: applicant finished the form.
    ScreeningSubmitted,
    /// `screening.payment_captured`: the screening was paid for.
    PaymentCaptured,
    /// `screening.failed`: the screening could not be completed.
    ScreeningFailed,
    /// `form.opened`: applicant opened the screening form.
    FormOpened,
    /// `invite.sent`: applicant was invited.
    InviteSent,
}

impl EventKind {
    /// Every known kind, in wire order.
    pub const ALL: [Self; 6] = [
        Self::ScreeningCompleted,
        Self::ScreeningSubmitted,
        Self::PaymentCaptured,
        Self::ScreeningFailed,
        Self::FormOpened,
        Self::InviteSent,
    ];

    pub(crate) const COUNT: usize = Self::ALL.len();

    /// The wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScreeningCompleted => "screening.completed",
            Self::ScreeningSubmitted => "screening.submitted",
            Self::PaymentCaptured => "screening.payment_captured",
            Self::ScreeningFailed => "screening.failed",
            Self::FormOpened => "form.opened",
            Self::InviteSent => "invite.sent",
        }
    }

    /// Resolves a wire tag to a kind, if it is one this SDK knows.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Stable position of this kind in a dispatch table.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data for `screening.completed`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreeningCompleted {
    #[serde(flatten)]
    pub screening: ScreeningRef,
    pub tenant: Person,
    pub landlord: Person,
    pub property: Property,
    pub result: ScreeningResult,
    pub cost: Cost,
    pub links: Links,
    pub created_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Data for `screening.submitted`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreeningSubmitted {
    #[serde(flatten)]
    pub screening: ScreeningRef,
    pub tenant: Person,
    pub status: ScreeningStatus,
    pub submitted_at: DateTime<Utc>,
    pub estimated_completion: DateTime<Utc>,
}

/// Data for `screening.payment_captured`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentCaptured {
    #[serde(flatten)]
    pub screening: ScreeningRef,
    pub payment: Payment,
    pub charged_at: DateTime<Utc>,
}

/// Data for `screening.failed`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScreeningFailed {
    #[serde(flatten)]
    pub screening: ScreeningRef,
    pub status: ScreeningStatus,
    /// Machine-readable failure reason, e.g. "no_response".
    pub reason: String,
    /// Individual failure details.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Data for `form.opened`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormOpened {
    #[serde(flatten)]
    pub screening: ScreeningRef,
    pub tenant_email: String,
}

/// Data for `invite.sent`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InviteSent {
    #[serde(flatten)]
    pub screening: ScreeningRef,
    pub tenant_email: String,
    /// Delivery channel, e.g. "email".
    pub invite_type: String,
}

/// The typed `data` payload of a delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    ScreeningCompleted(ScreeningCompleted),
    ScreeningSubmitted(ScreeningSubmitted),
    PaymentCaptured(PaymentCaptured),
    ScreeningFailed(ScreeningFailed),
    FormOpened(FormOpened),
    InviteSent(InviteSent),
    /// An event tag this SDK does not know. The raw `data` object is
    /// preserved so callers can still inspect it.
    Unknown(Value),
}

impl EventData {
    /// The kind of this payload, or `None` for [`Unknown`](Self::Unknown).
    #[must_use]
    pub const fn kind(&self) -> Option<EventKind> {
        match self {
            Self::ScreeningCompleted(_) => Some(EventKind::ScreeningCompleted),
            Self::ScreeningSubmitted(_) => Some(EventKind::ScreeningSubmitted),
            Self::PaymentCaptured(_) => Some(EventKind::PaymentCaptured),
            Self::ScreeningFailed(_) => Some(EventKind::ScreeningFailed),
            Self::FormOpened(_) => Some(EventKind::FormOpened),
            Self::InviteSent(_) => Some(EventKind::InviteSent),
            Self::Unknown(_) => None,
        }
    }
}

/// Envelope common to every delivery.
#[derive(Debug, Deserialize)]
struct RawEvent {
    event: String,
    timestamp: DateTime<Utc>,
    webhook_id: String,
    api_version: String,
    #[serde(default)]
    data: Value,
}

/// A decoded webhook delivery.
///
/// Constructed once per delivery by [`WebhookVerifier::decode`] and handed
/// to the caller; the SDK keeps nothing. The provider may redeliver an
/// event, and this SDK does not deduplicate; callers that need
/// exactly-once processing should key on [`webhook_id`](Self::webhook_id).
///
/// [`WebhookVerifier::decode`]: super::WebhookVerifier::decode
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    /// The event tag exactly as transmitted, including tags this SDK does
    /// not know.
    pub event: String,
    /// When the provider emitted the event. Distinct from the transport
    /// timestamp used for signature freshness.
    pub timestamp: DateTime<Utc>,
    /// Opaque delivery identifier, stable across redeliveries.
    pub webhook_id: String,
    /// Provider API version that produced the payload.
    pub api_version: String,
    /// The typed payload.
    pub data: EventData,
}

impl WebhookEvent {
    /// Decodes a raw JSON payload into an event.
    ///
    /// Performs no authentication; use [`WebhookVerifier::decode`] unless
    /// the payload has already been verified.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Payload`] when the body is not well-formed
    /// JSON, when a known tag's `data` does not match its documented
    /// shape, or when a payload's status field contradicts its own tag.
    ///
    /// [`WebhookVerifier::decode`]: super::WebhookVerifier::decode
    pub fn from_json(payload: &str) -> Result<Self, WebhookError> {
        let raw: RawEvent = serde_json::from_str(payload).map_err(WebhookError::payload)?;

        let data = match EventKind::from_tag(&raw.event) {
            Some(kind) => decode_data(kind, raw.data)?,
            None => EventData::Unknown(raw.data),
        };

        let event = Self {
            event: raw.event,
            timestamp: raw.timestamp,
            webhook_id: raw.webhook_id,
            api_version: raw.api_version,
            data,
        };
        event.check_consistency()?;
        Ok(event)
    }

    /// The known kind of this event, or `None` for unrecognized tags.
    #[must_use]
    pub const fn kind(&self) -> Option<EventKind> {
        self.data.kind()
    }

    /// Rejects payloads whose status field contradicts the event tag.
    ///
    /// Three kinds fix their status on the wire: completed events carry
    /// `result.status: "completed"`, submitted events `"processing"`,
    /// failed events `"failed"`. A disagreement means the payload was
    /// assembled wrong and must not reach a handler.
    fn check_consistency(&self) -> Result<(), WebhookError> {
        let checked = match &self.data {
            EventData::ScreeningCompleted(data) => {
                Some((data.result.status, ScreeningStatus::Completed))
            }
            EventData::ScreeningSubmitted(data) => Some((data.status, ScreeningStatus::Processing)),
            EventData::ScreeningFailed(data) => Some((data.status, ScreeningStatus::Failed)),
            _ => None,
        };

        match checked {
            Some((actual, expected)) if actual != expected => Err(WebhookError::inconsistent(
                format!("event '{}' carries status '{actual}', expected '{expected}'", self.event),
            )),
            _ => Ok(()),
        }
    }
}

fn decode_data(kind: EventKind, data: Value) -> Result<EventData, WebhookError> {
    let mismatch = |source: serde_json::Error| WebhookError::Payload {
        message: format!("invalid data for '{kind}': {source}"),
        source: Some(source),
    };

    let decoded = match kind {
        EventKind::ScreeningCompleted => {
            EventData::ScreeningCompleted(serde_json::from_value(data).map_err(mismatch)?)
        }
        EventKind::ScreeningSubmitted => {
            EventData::ScreeningSubmitted(serde_json::from_value(data).map_err(mismatch)?)
        }
        EventKind::PaymentCaptured => {
            EventData::PaymentCaptured(serde_json::from_value(data).map_err(mismatch)?)
        }
        EventKind::ScreeningFailed => {
            EventData::ScreeningFailed(serde_json::from_value(data).map_err(mismatch)?)
        }
        EventKind::FormOpened => {
            EventData::FormOpened(serde_json::from_value(data).map_err(mismatch)?)
        }
        EventKind::InviteSent => {
            EventData::InviteSent(serde_json::from_value(data).map_err(mismatch)?)
        }
    };
    Ok(decoded)
}
