//! Error types for client configuration.

use thiserror::Error;

/// Error type for configuration building and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API token was provided.
    #[error("Missing API token. {hint}")]
    MissingToken {
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// The API token (or user agent) contains bytes that cannot appear
    /// in an HTTP header.
    #[error("Invalid {field}: {reason}")]
    InvalidHeaderText {
        /// Name of the offending field
        field: &'static str,
        /// Reason for invalidity
        reason: &'static str,
    },

    /// The base URL could not be parsed.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// The invalid URL string
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// A duration field is out of range.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: &'static str,
    },

    /// A webhook verifier was requested but no webhook secret is
    /// configured.
    #[error("Missing webhook secret. {hint}")]
    MissingWebhookSecret {
        /// Hint for how to provide the value
        hint: &'static str,
    },
}

/// Environment variable names read by [`Config::from_env`].
///
/// [`Config::from_env`]: super::Config::from_env
pub mod env {
    /// The API token (required).
    pub const API_TOKEN: &str = "SINGLEKEY_API_TOKEN";
    /// Overrides the API base URL (optional).
    pub const BASE_URL: &str = "SINGLEKEY_BASE_URL";
    /// The webhook signing secret (optional).
    pub const WEBHOOK_SECRET: &str = "SINGLEKEY_WEBHOOK_SECRET";
}
