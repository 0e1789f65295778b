//! Webhook verification and event dispatch.
//!
//! The provider notifies endpoints about screening lifecycle changes with
//! signed HTTP deliveries. This module is the receiving side:
//! - Signature verification and replay guarding ([`WebhookVerifier`])
//! - Payload decoding into a discriminated event model ([`WebhookEvent`])
//! - Typed dispatch to caller handlers ([`EventRouter`])
//! - Fixture signing for tests ([`sign`], [`sign_now`])
//!
//! The module performs no I/O and no logging of its own; every failure
//! surfaces as a [`WebhookError`] to the immediate caller. Feed it the
//! RAW request body (re-serializing the JSON changes the bytes and
//! invalidates the signature) together with the values of the
//! [`SIGNATURE_HEADER`] and [`TIMESTAMP_HEADER`] headers.

mod dispatch;
mod error;
mod event;
mod signature;
mod verifier;

#[cfg(test)]
mod event_tests;

pub use dispatch::{DispatchOutcome, EventRouter};
pub use error::WebhookError;
pub use event::{
    EventData, EventKind, FormOpened, InviteSent, PaymentCaptured, ScreeningCompleted,
    ScreeningFailed, ScreeningSubmitted, WebhookEvent,
};
pub use signature::{
    SIGNATURE_HEADER, SignedPayload, TIMESTAMP_HEADER, WEBHOOK_USER_AGENT, compute_signature, sign,
    sign_now,
};
pub use verifier::{DEFAULT_TOLERANCE, WebhookVerifier};
