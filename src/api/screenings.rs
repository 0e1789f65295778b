//! The SingleKey API client.

use http::HeaderValue;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::client::ReqwestClient;
use super::error::{ApiError, HttpError};
use super::http::{HttpClient, HttpRequest};
use crate::config::Config;
use crate::screening::{
    CreateScreeningRequest, Invite, ListQuery, Page, Screening, SendInviteRequest,
};

fn json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

fn pdf() -> HeaderValue {
    HeaderValue::from_static("application/pdf")
}

/// Client for the SingleKey tenant screening API.
///
/// All operations go through the [`HttpClient`] seam, so tests can swap
/// in a mock transport with [`with_http`](Self::with_http). The client
/// holds no mutable state and can be shared freely across tasks; cloning
/// shares the underlying transport.
///
/// # Example
///
/// ```no_run
/// use singlekey::{Config, SingleKey};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::from_env()?;
/// let client = SingleKey::new(&config)?;
///
/// let screening = client.get_screening("pt_123").await?;
/// println!("status: {}", screening.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SingleKey<H = ReqwestClient> {
    http: H,
    base_url: Url,
    api_token: SecretString,
    user_agent: String,
}

impl SingleKey<ReqwestClient> {
    /// Creates a client with the production transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] when the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = ReqwestClient::with_config(config.timeout(), config.user_agent())?;
        Ok(Self::with_http(config, http))
    }
}

impl<H: HttpClient> SingleKey<H> {
    /// Creates a client over a caller-supplied transport.
    ///
    /// This is the test seam: inject a mock [`HttpClient`] to exercise
    /// the request/response mapping without a network.
    #[must_use]
    pub fn with_http(config: &Config, http: H) -> Self {
        Self {
            http,
            base_url: config.base_url().clone(),
            api_token: config.api_token().clone(),
            user_agent: config.user_agent().to_string(),
        }
    }

    /// Creates a screening for a tenant.
    ///
    /// Applicant fields are validated locally first, so malformed input
    /// fails with [`ApiError::InvalidField`] before anything is sent.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidField`] for local validation failures, or any
    /// transport/status error from the provider.
    pub async fn create_screening(
        &self,
        request: &CreateScreeningRequest,
    ) -> Result<Screening, ApiError> {
        request.validate()?;
        let url = self.endpoint("screenings")?;

        tracing::debug!(
            customer = %request.external_customer_id,
            tenant = %request.external_tenant_id,
            "creating screening"
        );

        let request = self.post_json(url, request);
        self.execute_json(request, "screening").await
    }

    /// Fetches a screening by its purchase token.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown token, or any
    /// transport/status error from the provider.
    pub async fn get_screening(&self, purchase_token: &str) -> Result<Screening, ApiError> {
        let url = self.endpoint(&format!("screenings/{purchase_token}"))?;
        let request = self.get(url);
        self.execute_json(request, &format!("screening '{purchase_token}'"))
            .await
    }

    /// Lists screenings, newest first.
    ///
    /// # Errors
    ///
    /// Any transport/status error from the provider.
    pub async fn list_screenings(&self, query: &ListQuery) -> Result<Page<Screening>, ApiError> {
        let mut url = self.endpoint("screenings")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(page) = query.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(per_page) = query.per_page {
                pairs.append_pair("per_page", &per_page.to_string());
            }
            if let Some(status) = query.status {
                pairs.append_pair("status", status.as_str());
            }
        }

        let request = self.get(url);
        self.execute_json(request, "screenings").await
    }

    /// Invites a tenant to complete their screening.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidField`] for a malformed tenant email, or any
    /// transport/status error from the provider.
    pub async fn send_invite(&self, request: &SendInviteRequest) -> Result<Invite, ApiError> {
        request.validate()?;
        let url = self.endpoint("invites")?;

        tracing::debug!(tenant = %request.external_tenant_id, "sending screening invite");

        let request = self.post_json(url, request);
        self.execute_json(request, "invite").await
    }

    /// Downloads the PDF report for a completed screening.
    ///
    /// The PDF is rendered asynchronously after completion; until
    /// `result.pdf_ready` is true the provider answers 409/425, surfaced
    /// here as [`ApiError::ReportNotReady`].
    ///
    /// # Errors
    ///
    /// [`ApiError::ReportNotReady`] while the PDF is still rendering,
    /// [`ApiError::NotFound`] for an unknown token, or any
    /// transport/status error from the provider.
    pub async fn report_pdf(&self, purchase_token: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(&format!("screenings/{purchase_token}/report.pdf"))?;
        let request = HttpRequest::get(url)
            .with_header(AUTHORIZATION, self.authorization())
            .with_header(USER_AGENT, self.user_agent_value())
            .with_header(ACCEPT, pdf());

        let response = self.http.request(request).await?;
        if response.status == http::StatusCode::CONFLICT
            || response.status == http::StatusCode::TOO_EARLY
        {
            return Err(ApiError::ReportNotReady {
                purchase_token: purchase_token.to_string(),
            });
        }
        if !response.is_success() {
            return Err(ApiError::from_response(
                &response,
                &format!("report for screening '{purchase_token}'"),
            ));
        }
        Ok(response.body)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Http(HttpError::InvalidUrl(e.to_string())))
    }

    fn get(&self, url: Url) -> HttpRequest {
        HttpRequest::get(url)
            .with_header(AUTHORIZATION, self.authorization())
            .with_header(USER_AGENT, self.user_agent_value())
            .with_header(ACCEPT, json())
    }

    fn post_json<T: serde::Serialize>(&self, url: Url, body: &T) -> HttpRequest {
        let body = serde_json::to_vec(body).expect("request types serialize infallibly");
        HttpRequest::post(url)
            .with_header(AUTHORIZATION, self.authorization())
            .with_header(USER_AGENT, self.user_agent_value())
            .with_header(ACCEPT, json())
            .with_header(CONTENT_TYPE, json())
            .with_body(body)
    }

    fn authorization(&self) -> HeaderValue {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", self.api_token.expose_secret()))
                .expect("token is validated as header-safe at construction");
        value.set_sensitive(true);
        value
    }

    fn user_agent_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.user_agent)
            .expect("user agent is validated as header-safe at construction")
    }

    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: HttpRequest,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = self.http.request(request).await?;
        if !response.is_success() {
            tracing::debug!(status = %response.status, resource, "request rejected");
            return Err(ApiError::from_response(&response, resource));
        }
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}
