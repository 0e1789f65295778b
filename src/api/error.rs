//! Error types for HTTP transport and API operations.

use serde::Deserialize;
use thiserror::Error;

use super::http::HttpResponse;
use crate::validation::ValidationError;

/// Error type for the HTTP transport.
///
/// Reserved for requests that never produced a response; a response with
/// a non-success status becomes an [`ApiError`] instead.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error body the provider attaches to non-2xx responses.
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

impl ErrorBody {
    fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Error type for API operations.
///
/// Maps the provider's HTTP status codes onto a typed taxonomy so callers
/// can branch on what went wrong instead of re-parsing status codes. The
/// SDK never retries; transient failures surface immediately and retry
/// policy stays with the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Http(#[from] HttpError),

    /// A request field failed local validation before anything was sent.
    #[error("Invalid request field: {0}")]
    InvalidField(#[from] ValidationError),

    /// HTTP 401: the API token was missing, expired, or revoked.
    #[error("Authentication rejected: {message}")]
    Unauthorized {
        /// Provider-supplied detail, when present.
        message: String,
    },

    /// HTTP 403: the token is valid but not allowed to do this.
    #[error("Access denied: {message}")]
    Forbidden {
        /// Provider-supplied detail, when present.
        message: String,
    },

    /// HTTP 404: the requested resource does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Human-readable description of what was requested.
        resource: String,
    },

    /// HTTP 422: the provider rejected one or more request fields.
    #[error("Provider validation failed: {message}")]
    Validation {
        /// Summary of the rejection.
        message: String,
        /// Individual field errors, when the provider itemized them.
        errors: Vec<String>,
    },

    /// HTTP 429: too many requests.
    #[error("Rate limited by the provider")]
    RateLimited {
        /// Seconds to wait, from the `Retry-After` header when present.
        retry_after_secs: Option<u64>,
    },

    /// The report PDF has not been rendered yet.
    ///
    /// Poll the screening until `result.pdf_ready` is true, or wait for
    /// the `screening.completed` webhook.
    #[error("Report for screening '{purchase_token}' is not ready yet")]
    ReportNotReady {
        /// The screening whose report was requested.
        purchase_token: String,
    },

    /// Any other 4xx response.
    #[error("Request failed with status {status}")]
    Request {
        /// The response status code.
        status: http::StatusCode,
        /// Provider-supplied detail, when present.
        message: Option<String>,
    },

    /// A 5xx response: the problem is on the provider's side.
    #[error("Provider error with status {status}")]
    Server {
        /// The response status code.
        status: http::StatusCode,
        /// Provider-supplied detail, when present.
        message: Option<String>,
    },

    /// A 2xx response whose body did not match the documented shape.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// What the deserializer objected to.
        message: String,
    },

    /// Polling ended without the screening reaching a terminal status.
    #[error("Screening '{purchase_token}' did not finish within {checks} status checks")]
    PollTimeout {
        /// The screening being watched.
        purchase_token: String,
        /// How many checks were made before giving up.
        checks: u32,
    },
}

impl ApiError {
    /// Classifies a non-success response into the taxonomy.
    ///
    /// `resource` describes what was being fetched, for 404 messages.
    pub(crate) fn from_response(response: &HttpResponse, resource: &str) -> Self {
        let body = ErrorBody::parse(&response.body);
        let message = body.error;
        let status = response.status;

        match status {
            http::StatusCode::UNAUTHORIZED => Self::Unauthorized {
                message: message.unwrap_or_else(|| "invalid API token".to_string()),
            },
            http::StatusCode::FORBIDDEN => Self::Forbidden {
                message: message.unwrap_or_else(|| "insufficient permissions".to_string()),
            },
            http::StatusCode::NOT_FOUND => Self::NotFound {
                resource: resource.to_string(),
            },
            http::StatusCode::UNPROCESSABLE_ENTITY => Self::Validation {
                message: message.unwrap_or_else(|| "request rejected".to_string()),
                errors: body.errors,
            },
            http::StatusCode::TOO_MANY_REQUESTS => Self::RateLimited {
                retry_after_secs: retry_after_secs(response),
            },
            _ if status.is_server_error() => Self::Server { status, message },
            _ => Self::Request { status, message },
        }
    }
}

fn retry_after_secs(response: &HttpResponse) -> Option<u64> {
    response
        .headers
        .get(http::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}
