//! Tests for webhook event decoding: every known variant, forward
//! compatibility for unknown tags, and consistency rejection.

use super::event::{EventData, EventKind, WebhookEvent};
use crate::screening::ScreeningStatus;
use crate::webhook::WebhookError;

fn envelope(event: &str, data: &str) -> String {
    format!(
        r#"{{"event":"{event}","timestamp":"2024-01-01T00:00:00Z","webhook_id":"wh_42","api_version":"1.0","data":{data}}}"#
    )
}

const COMPLETED_DATA: &str = r#"{
    "purchase_token": "pt_1",
    "external_customer_id": "cust_1",
    "external_tenant_id": "ten_1",
    "external_deal_id": "deal_1",
    "tenant": {"email": "t@example.com", "first_name": "Tia", "last_name": "Ng"},
    "landlord": {"email": "l@example.com", "first_name": "Lou", "last_name": "Hart"},
    "property": {"address": "12 King St W", "rent": 2150, "unit": "804"},
    "result": {"status": "completed", "singlekey_score": 712, "recommendation": "approve", "pdf_ready": true},
    "cost": {"amount": 25.0, "tax": 3.25, "currency": "CAD"},
    "links": {"report": "https://app.example/r/1", "pdf": "https://app.example/r/1.pdf"},
    "created_at": "2024-01-01T00:00:00Z",
    "completed_at": "2024-01-01T00:45:00Z"
}"#;

mod kinds {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_tag() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_tags_resolve_to_none() {
        assert_eq!(EventKind::from_tag("new.unknown.tag"), None);
        assert_eq!(EventKind::from_tag(""), None);
        assert_eq!(EventKind::from_tag("screening.Completed"), None);
    }

    #[test]
    fn display_matches_wire_tag() {
        assert_eq!(
            EventKind::PaymentCaptured.to_string(),
            "screening.payment_captured"
        );
    }
}

mod known_variants {
    use super::*;

    #[test]
    fn screening_completed_decodes() {
        let payload = envelope("screening.completed", COMPLETED_DATA);
        let event = WebhookEvent::from_json(&payload).unwrap();

        assert_eq!(event.kind(), Some(EventKind::ScreeningCompleted));
        let EventData::ScreeningCompleted(data) = &event.data else {
            panic!("wrong variant");
        };
        assert_eq!(data.screening.purchase_token, "pt_1");
        assert_eq!(data.result.singlekey_score, Some(712.0));
        assert!(data.result.pdf_ready);
        assert_eq!(data.links.pdf, "https://app.example/r/1.pdf");
    }

    #[test]
    fn screening_submitted_decodes() {
        let data = r#"{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "tenant": {"email": "t@example.com", "first_name": "Tia", "last_name": "Ng"},
            "status": "processing",
            "submitted_at": "2024-01-01T00:10:00Z",
            "estimated_completion": "2024-01-01T01:00:00Z"
        }"#;
        let event = WebhookEvent::from_json(&envelope("screening.submitted", data)).unwrap();

        let EventData::ScreeningSubmitted(data) = &event.data else {
            panic!("wrong variant");
        };
        assert_eq!(data.status, ScreeningStatus::Processing);
        assert_eq!(data.tenant.first_name, "Tia");
    }

    #[test]
    fn payment_captured_decodes() {
        let data = r#"{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "payment": {
                "amount": 25.0,
                "tax": 3.25,
                "total": 28.25,
                "currency": "CAD",
                "method": {"type": "card", "brand": "visa", "last_4": "4242"},
                "paid_by": "landlord"
            },
            "charged_at": "2024-01-01T00:05:00Z"
        }"#;
        let event =
            WebhookEvent::from_json(&envelope("screening.payment_captured", data)).unwrap();

        let EventData::PaymentCaptured(data) = &event.data else {
            panic!("wrong variant");
        };
        assert_eq!(data.payment.method.last_4, "4242");
        assert_eq!(data.payment.total, 28.25);
    }

    #[test]
    fn screening_failed_decodes_with_missing_errors_array() {
        let data = r#"{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "status": "failed",
            "reason": "no_response"
        }"#;
        let event = WebhookEvent::from_json(&envelope("screening.failed", data)).unwrap();

        let EventData::ScreeningFailed(data) = &event.data else {
            panic!("wrong variant");
        };
        assert!(data.errors.is_empty());
    }

    #[test]
    fn form_opened_decodes() {
        let data = r#"{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "tenant_email": "t@example.com"
        }"#;
        let event = WebhookEvent::from_json(&envelope("form.opened", data)).unwrap();

        let EventData::FormOpened(data) = &event.data else {
            panic!("wrong variant");
        };
        assert_eq!(data.tenant_email, "t@example.com");
    }

    #[test]
    fn invite_sent_decodes() {
        let data = r#"{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "tenant_email": "t@example.com",
            "invite_type": "email"
        }"#;
        let event = WebhookEvent::from_json(&envelope("invite.sent", data)).unwrap();

        assert_eq!(event.kind(), Some(EventKind::InviteSent));
        let EventData::InviteSent(data) = &event.data else {
            panic!("wrong variant");
        };
        assert_eq!(data.invite_type, "email");
    }
}

mod forward_compatibility {
    use super::*;

    #[test]
    fn unknown_tag_decodes_to_an_opaque_bag() {
        let payload = envelope("new.unknown.tag", r#"{"anything": [1, 2, 3]}"#);
        let event = WebhookEvent::from_json(&payload).unwrap();

        assert_eq!(event.event, "new.unknown.tag");
        assert_eq!(event.kind(), None);
        let EventData::Unknown(value) = &event.data else {
            panic!("wrong variant");
        };
        assert_eq!(value["anything"][2], 3);
    }

    #[test]
    fn unknown_tag_with_missing_data_still_decodes() {
        let payload = r#"{"event":"new.unknown.tag","timestamp":"2024-01-01T00:00:00Z","webhook_id":"wh_1","api_version":"1.0"}"#;
        let event = WebhookEvent::from_json(payload).unwrap();

        assert!(matches!(event.data, EventData::Unknown(_)));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn known_tag_with_wrong_data_shape_is_a_payload_error() {
        let payload = envelope("screening.completed", r#"{"only": "this"}"#);
        let result = WebhookEvent::from_json(&payload);

        let Err(WebhookError::Payload { message, .. }) = result else {
            panic!("expected a payload error");
        };
        assert!(message.contains("screening.completed"));
    }

    #[test]
    fn missing_envelope_field_is_a_payload_error() {
        let payload = r#"{"event":"invite.sent","timestamp":"2024-01-01T00:00:00Z","data":{}}"#;
        let result = WebhookEvent::from_json(payload);

        assert!(matches!(result, Err(WebhookError::Payload { .. })));
    }

    #[test]
    fn invalid_envelope_timestamp_is_a_payload_error() {
        let payload = r#"{"event":"invite.sent","timestamp":"yesterday","webhook_id":"wh_1","api_version":"1.0","data":{}}"#;
        let result = WebhookEvent::from_json(payload);

        assert!(matches!(result, Err(WebhookError::Payload { .. })));
    }

    #[test]
    fn completed_event_with_failed_status_is_inconsistent() {
        let data = COMPLETED_DATA.replace(r#""status": "completed""#, r#""status": "failed""#);
        let result = WebhookEvent::from_json(&envelope("screening.completed", &data));

        let Err(WebhookError::Payload { message, .. }) = result else {
            panic!("expected a payload error");
        };
        assert!(message.contains("expected 'completed'"));
    }

    #[test]
    fn failed_event_with_completed_status_is_inconsistent() {
        let data = r#"{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "status": "completed",
            "reason": "no_response",
            "errors": []
        }"#;
        let result = WebhookEvent::from_json(&envelope("screening.failed", data));

        assert!(matches!(result, Err(WebhookError::Payload { .. })));
    }

    #[test]
    fn submitted_event_with_pending_status_is_inconsistent() {
        let data = r#"{
            "purchase_token": "pt_1",
            "external_customer_id": "cust_1",
            "external_tenant_id": "ten_1",
            "tenant": {"email": "t@example.com", "first_name": "Tia", "last_name": "Ng"},
            "status": "pending",
            "submitted_at": "2024-01-01T00:10:00Z",
            "estimated_completion": "2024-01-01T01:00:00Z"
        }"#;
        let result = WebhookEvent::from_json(&envelope("screening.submitted", data));

        assert!(matches!(result, Err(WebhookError::Payload { .. })));
    }
}
