//! Default values for client configuration.
//!
//! Centralized constants to avoid magic numbers scattered across the
//! codebase.

use std::time::Duration;

/// Default API base URL.
///
/// Kept with a trailing slash so relative endpoint paths join onto it
/// instead of replacing the version segment.
pub const BASE_URL: &str = "https://api.singlekey.com/v1/";

/// Default user agent for outbound API requests.
pub const USER_AGENT: &str = concat!("singlekey-rs/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default webhook staleness tolerance in seconds.
pub const WEBHOOK_TOLERANCE_SECS: u64 = 300;

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default webhook tolerance as Duration.
#[must_use]
pub const fn webhook_tolerance() -> Duration {
    Duration::from_secs(WEBHOOK_TOLERANCE_SECS)
}
