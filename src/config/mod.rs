//! Configuration layer for the SDK.
//!
//! A [`Config`] carries everything the client and webhook verifier need:
//! API token, base URL, timeouts, and the optional webhook secret. Build
//! one explicitly with [`Config::builder`], or from the environment with
//! [`Config::from_env`] (see [`env`] for the variable names).
//!
//! Secret material (API token, webhook secret) is held as
//! [`SecretString`]: redacted in `Debug` output and never serialized.

pub mod defaults;
mod error;

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::webhook::WebhookVerifier;

pub use error::{ConfigError, env};

/// Validated client configuration.
///
/// Immutable once built. The token and user agent are guaranteed
/// header-safe, and the base URL is guaranteed to end with `/` so
/// endpoint paths join correctly.
#[derive(Debug, Clone)]
pub struct Config {
    api_token: SecretString,
    base_url: Url,
    user_agent: String,
    timeout: Duration,
    webhook_secret: Option<SecretString>,
    webhook_tolerance: Duration,
}

impl Config {
    /// Starts building a configuration with the given API token.
    #[must_use]
    pub fn builder(api_token: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(api_token)
    }

    /// Builds a configuration from the environment.
    ///
    /// Reads [`env::API_TOKEN`] (required), [`env::BASE_URL`] and
    /// [`env::WEBHOOK_SECRET`] (optional).
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingToken`] when the token variable is unset or
    /// empty, or any validation error from [`ConfigBuilder::build`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(env::API_TOKEN).map_err(|_| ConfigError::MissingToken {
            hint: "Set the SINGLEKEY_API_TOKEN environment variable.",
        })?;

        let mut builder = Self::builder(token);
        if let Ok(base_url) = std::env::var(env::BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Ok(secret) = std::env::var(env::WEBHOOK_SECRET) {
            builder = builder.webhook_secret(secret);
        }
        builder.build()
    }

    /// The API token.
    #[must_use]
    pub const fn api_token(&self) -> &SecretString {
        &self.api_token
    }

    /// The API base URL (always ends with `/`).
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The user agent sent with API requests.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The webhook staleness tolerance.
    #[must_use]
    pub const fn webhook_tolerance(&self) -> Duration {
        self.webhook_tolerance
    }

    /// Builds a [`WebhookVerifier`] from the configured webhook secret
    /// and tolerance.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingWebhookSecret`] when no webhook secret was
    /// configured. Verification without a secret is only available
    /// through the explicit [`WebhookVerifier::unverified`] constructor.
    pub fn webhook_verifier(&self) -> Result<WebhookVerifier, ConfigError> {
        let secret = self
            .webhook_secret
            .as_ref()
            .ok_or(ConfigError::MissingWebhookSecret {
                hint: "Set the SINGLEKEY_WEBHOOK_SECRET environment variable or call ConfigBuilder::webhook_secret.",
            })?;

        Ok(WebhookVerifier::new(secret.clone()).with_tolerance(self.webhook_tolerance))
    }
}

/// Builder for [`Config`].
#[derive(Debug)]
pub struct ConfigBuilder {
    api_token: String,
    base_url: Option<String>,
    user_agent: Option<String>,
    timeout: Duration,
    webhook_secret: Option<String>,
    webhook_tolerance: Duration,
}

impl ConfigBuilder {
    fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: None,
            user_agent: None,
            timeout: defaults::timeout(),
            webhook_secret: None,
            webhook_tolerance: defaults::webhook_tolerance(),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Overrides the user agent sent with API requests.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the webhook signing secret.
    #[must_use]
    pub fn webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Sets the webhook staleness tolerance.
    #[must_use]
    pub const fn webhook_tolerance(mut self, tolerance: Duration) -> Self {
        self.webhook_tolerance = tolerance;
        self
    }

    /// Validates the configuration and builds it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingToken`] for an empty token
    /// - [`ConfigError::InvalidHeaderText`] for a token or user agent
    ///   that cannot appear in an HTTP header
    /// - [`ConfigError::InvalidBaseUrl`] for an unparseable base URL
    /// - [`ConfigError::InvalidDuration`] for a zero timeout
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.api_token.is_empty() {
            return Err(ConfigError::MissingToken {
                hint: "Provide the token issued in the SingleKey dashboard.",
            });
        }
        validate_header_text("API token", &self.api_token)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| defaults::USER_AGENT.to_string());
        validate_header_text("user agent", &user_agent)?;

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than zero",
            });
        }

        let raw_url = self
            .base_url
            .unwrap_or_else(|| defaults::BASE_URL.to_string());
        let base_url = parse_base_url(&raw_url)?;

        Ok(Config {
            api_token: SecretString::from(self.api_token),
            base_url,
            user_agent,
            timeout: self.timeout,
            webhook_secret: self.webhook_secret.map(SecretString::from),
            webhook_tolerance: self.webhook_tolerance,
        })
    }
}

/// Tokens and user agents end up in HTTP headers; reject anything
/// outside visible ASCII up front so request building cannot fail later.
fn validate_header_text(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let header_safe = value.bytes().all(|b| (0x20..=0x7e).contains(&b));
    if header_safe {
        Ok(())
    } else {
        Err(ConfigError::InvalidHeaderText {
            field,
            reason: "must contain only visible ASCII characters",
        })
    }
}

/// Parses the base URL, normalizing it to end with `/` so that
/// `Url::join` appends endpoint paths instead of replacing the last
/// path segment.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}
