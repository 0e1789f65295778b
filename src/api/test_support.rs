//! Shared fixtures for API tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::config::Config;

/// Mock transport that replays a scripted sequence of responses and
/// captures every request it receives.
pub(super) struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(super) fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn replying(responses: Vec<HttpResponse>) -> Arc<Self> {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    pub(super) fn captured(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(super) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpClient for Arc<MockTransport> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("more requests than scripted responses")
    }
}

/// JSON response with the given status.
pub(super) fn json_response(status: u16, body: &str) -> HttpResponse {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        headers,
        body.as_bytes().to_vec(),
    )
}

/// Configuration pointing at a fake host.
pub(super) fn test_config() -> Config {
    Config::builder("sk_test_token")
        .base_url("https://api.test.invalid/v1")
        .build()
        .unwrap()
}

/// A screening resource body in the given status.
pub(super) fn screening_json(status: &str) -> String {
    format!(
        r#"{{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "tenant": {{"email": "t@example.com", "first_name": "Tia", "last_name": "Ng"}},
            "property": {{"address": "12 King St W", "rent": 2150}},
            "status": "{status}",
            "created_at": "2024-01-01T00:00:00Z"
        }}"#
    )
}
