//! HTTP transport and REST surface for the SingleKey API.
//!
//! This module provides:
//! - Request/response value types and the transport seam ([`HttpRequest`],
//!   [`HttpResponse`], [`HttpClient`])
//! - The production transport ([`ReqwestClient`])
//! - The API client ([`SingleKey`]) with screening, invite, and report
//!   operations
//! - Report polling ([`PollPolicy`], [`SingleKey::wait_for_completion`],
//!   [`SingleKey::watch`])
//! - The error taxonomy ([`ApiError`], [`HttpError`])

mod client;
mod error;
mod http;
mod poll;
mod screenings;
mod watch;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod screenings_tests;

pub use client::ReqwestClient;
pub use error::{ApiError, HttpError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use poll::PollPolicy;
pub use screenings::SingleKey;
