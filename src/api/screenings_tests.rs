//! Tests for the `SingleKey` client: request construction, auth headers,
//! and the status-to-error mapping.

use super::error::{ApiError, HttpError};
use super::http::HttpResponse;
use super::screenings::SingleKey;
use super::test_support::{MockTransport, json_response, screening_json, test_config};
use crate::screening::{
    CreateScreeningRequest, ListQuery, Person, Property, ScreeningStatus, SendInviteRequest,
};

fn create_request() -> CreateScreeningRequest {
    CreateScreeningRequest {
        external_customer_id: "cust_1".to_string(),
        external_tenant_id: "ten_1".to_string(),
        external_deal_id: None,
        external_listing_id: None,
        tenant: Person {
            email: "t@example.com".to_string(),
            first_name: "Tia".to_string(),
            last_name: "Ng".to_string(),
        },
        landlord: None,
        property: Property {
            address: "12 King St W".to_string(),
            rent: 2150.0,
            unit: None,
        },
        tenant_phone: None,
        tenant_sin: None,
        postal_code: None,
    }
}

mod request_construction {
    use super::*;

    #[tokio::test]
    async fn get_sends_auth_and_accept_headers() {
        let transport = MockTransport::replying(vec![json_response(200, &screening_json("pending"))]);
        let client = SingleKey::with_http(&test_config(), transport.clone());

        client.get_screening("pt_1").await.unwrap();

        let requests = transport.captured();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://api.test.invalid/v1/screenings/pt_1"
        );
        assert_eq!(
            request.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bearer sk_test_token"
        );
        assert_eq!(
            request.headers.get(http::header::ACCEPT).unwrap(),
            "application/json"
        );
        assert!(request.headers.get(http::header::USER_AGENT).is_some());
    }

    #[tokio::test]
    async fn authorization_header_is_marked_sensitive() {
        let transport = MockTransport::replying(vec![json_response(200, &screening_json("pending"))]);
        let client = SingleKey::with_http(&test_config(), transport.clone());

        client.get_screening("pt_1").await.unwrap();

        let requests = transport.captured();
        let auth = requests[0].headers.get(http::header::AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
    }

    #[tokio::test]
    async fn create_posts_a_json_body() {
        let transport = MockTransport::replying(vec![json_response(201, &screening_json("pending"))]);
        let client = SingleKey::with_http(&test_config(), transport.clone());

        client.create_screening(&create_request()).await.unwrap();

        let requests = transport.captured();
        let request = &requests[0];
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), "https://api.test.invalid/v1/screenings");
        assert_eq!(
            request.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["external_customer_id"], "cust_1");
        assert_eq!(body["tenant"]["email"], "t@example.com");
        // Unset optionals are omitted, not serialized as null
        assert!(body.get("external_deal_id").is_none());
    }

    #[tokio::test]
    async fn list_builds_query_parameters() {
        let body = r#"{"data": [], "page": 2, "per_page": 50, "total": 0}"#;
        let transport = MockTransport::replying(vec![json_response(200, body)]);
        let client = SingleKey::with_http(&test_config(), transport.clone());

        let query = ListQuery {
            page: Some(2),
            per_page: Some(50),
            status: Some(ScreeningStatus::Completed),
        };
        let page = client.list_screenings(&query).await.unwrap();
        assert_eq!(page.page, 2);

        let requests = transport.captured();
        let url = requests[0].url.as_str();
        assert!(url.contains("page=2"));
        assert!(url.contains("per_page=50"));
        assert!(url.contains("status=completed"));
    }

    #[tokio::test]
    async fn send_invite_posts_to_invites() {
        let body = r#"{"tenant_email": "t@example.com", "invite_type": "email", "sent_at": "2024-01-01T00:00:00Z"}"#;
        let transport = MockTransport::replying(vec![json_response(200, body)]);
        let client = SingleKey::with_http(&test_config(), transport.clone());

        let invite = client
            .send_invite(&SendInviteRequest {
                external_customer_id: "cust_1".to_string(),
                external_tenant_id: "ten_1".to_string(),
                tenant_email: "t@example.com".to_string(),
                invite_type: "email".to_string(),
                external_deal_id: None,
            })
            .await
            .unwrap();

        assert_eq!(invite.invite_type, "email");
        let requests = transport.captured();
        assert_eq!(requests[0].url.as_str(), "https://api.test.invalid/v1/invites");
    }

    #[tokio::test]
    async fn local_validation_fails_before_any_request() {
        let transport = MockTransport::replying(vec![]);
        let client = SingleKey::with_http(&test_config(), transport.clone());

        let mut request = create_request();
        request.tenant.email = "nope".to_string();
        let result = client.create_screening(&request).await;

        assert!(matches!(result, Err(ApiError::InvalidField(_))));
        assert_eq!(transport.calls(), 0);
    }
}

mod response_mapping {
    use super::*;

    #[tokio::test]
    async fn success_decodes_the_screening() {
        let transport =
            MockTransport::replying(vec![json_response(200, &screening_json("processing"))]);
        let client = SingleKey::with_http(&test_config(), transport);

        let screening = client.get_screening("pt_1").await.unwrap();

        assert_eq!(screening.status, ScreeningStatus::Processing);
        assert_eq!(screening.screening.purchase_token, "pt_1");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_unauthorized() {
        let transport =
            MockTransport::replying(vec![json_response(401, r#"{"error":"token revoked"}"#)]);
        let client = SingleKey::with_http(&test_config(), transport);

        let result = client.get_screening("pt_1").await;
        assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn not_found_names_the_screening() {
        let transport = MockTransport::replying(vec![json_response(404, "{}")]);
        let client = SingleKey::with_http(&test_config(), transport);

        let error = client.get_screening("pt_missing").await.unwrap_err();
        assert!(error.to_string().contains("pt_missing"));
    }

    #[tokio::test]
    async fn unprocessable_maps_to_validation_with_items() {
        let body = r#"{"error":"invalid fields","errors":["tenant.email is malformed"]}"#;
        let transport = MockTransport::replying(vec![json_response(422, body)]);
        let client = SingleKey::with_http(&test_config(), transport);

        let error = client.create_screening(&create_request()).await.unwrap_err();
        let ApiError::Validation { errors, .. } = error else {
            panic!("wrong variant");
        };
        assert_eq!(errors, vec!["tenant.email is malformed".to_string()]);
    }

    #[tokio::test]
    async fn server_error_maps_to_server() {
        let transport = MockTransport::replying(vec![json_response(500, "")]);
        let client = SingleKey::with_http(&test_config(), transport);

        let result = client.get_screening("pt_1").await;
        assert!(matches!(result, Err(ApiError::Server { .. })));
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let transport = MockTransport::new(vec![Err(HttpError::Timeout)]);
        let client = SingleKey::with_http(&test_config(), transport);

        let result = client.get_screening("pt_1").await;
        assert!(matches!(result, Err(ApiError::Http(HttpError::Timeout))));
    }

    #[tokio::test]
    async fn undecodable_success_body_maps_to_decode() {
        let transport = MockTransport::replying(vec![json_response(200, r#"{"nope": true}"#)]);
        let client = SingleKey::with_http(&test_config(), transport);

        let result = client.get_screening("pt_1").await;
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }
}

mod report_pdf {
    use super::*;

    #[tokio::test]
    async fn success_returns_the_bytes() {
        let pdf = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"%PDF-1.7 fake".to_vec(),
        );
        let transport = MockTransport::replying(vec![pdf]);
        let client = SingleKey::with_http(&test_config(), transport.clone());

        let bytes = client.report_pdf("pt_1").await.unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let requests = transport.captured();
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.test.invalid/v1/screenings/pt_1/report.pdf"
        );
        assert_eq!(
            requests[0].headers.get(http::header::ACCEPT).unwrap(),
            "application/pdf"
        );
    }

    #[tokio::test]
    async fn conflict_means_not_ready() {
        let transport = MockTransport::replying(vec![json_response(409, "{}")]);
        let client = SingleKey::with_http(&test_config(), transport);

        let result = client.report_pdf("pt_1").await;
        let Err(ApiError::ReportNotReady { purchase_token }) = result else {
            panic!("expected ReportNotReady");
        };
        assert_eq!(purchase_token, "pt_1");
    }

    #[tokio::test]
    async fn too_early_means_not_ready() {
        let transport = MockTransport::replying(vec![json_response(425, "{}")]);
        let client = SingleKey::with_http(&test_config(), transport);

        let result = client.report_pdf("pt_1").await;
        assert!(matches!(result, Err(ApiError::ReportNotReady { .. })));
    }

    #[tokio::test]
    async fn not_found_stays_not_found() {
        let transport = MockTransport::replying(vec![json_response(404, "{}")]);
        let client = SingleKey::with_http(&test_config(), transport);

        let result = client.report_pdf("pt_1").await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }
}
