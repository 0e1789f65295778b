//! Domain model for tenant screenings.
//!
//! These types are shared by the REST surface ([`crate::api`]) and the
//! webhook payloads ([`crate::webhook`]): the provider serializes the same
//! shapes into API responses and event `data` objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    ValidationError, validate_email, validate_phone, validate_postal_code, validate_sin,
};

/// Lifecycle state of a screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStatus {
    /// Created but the applicant has not submitted yet.
    Pending,
    /// Submitted and being processed by the provider.
    Processing,
    /// Report is ready.
    Completed,
    /// The screening could not be completed.
    Failed,
}

impl ScreeningStatus {
    /// Returns true once the screening can no longer change state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ScreeningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers tying a screening to the caller's own records.
///
/// Present on every screening resource and flattened into every webhook
/// payload. The `external_*` values are echoes of what the caller supplied
/// at creation time; `purchase_token` is the provider's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRef {
    /// Provider-assigned identifier for this purchase.
    pub purchase_token: String,
    /// Caller's identifier for the landlord/customer account.
    pub external_customer_id: String,
    /// Caller's identifier for the tenant being screened.
    pub external_tenant_id: String,
    /// Caller's deal identifier, if one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_deal_id: Option<String>,
    /// Caller's listing identifier, if one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_listing_id: Option<String>,
}

/// A person attached to a screening (tenant or landlord).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// The rental property a screening concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub address: String,
    /// Monthly rent in the screening's currency.
    pub rent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Outcome of a completed screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub status: ScreeningStatus,
    /// Aggregate score, or null when the provider could not compute one.
    pub singlekey_score: Option<f64>,
    pub recommendation: String,
    /// Whether the PDF report has been rendered yet.
    pub pdf_ready: bool,
}

/// What the screening cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub amount: f64,
    pub tax: f64,
    /// ISO-4217 code, e.g. "CAD".
    pub currency: String,
}

/// URLs for retrieving the finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Hosted report viewer.
    pub report: String,
    /// Direct PDF download.
    pub pdf: String,
}

/// Instrument used to pay for a screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Payment instrument type, e.g. "card".
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub last_4: String,
}

/// A captured screening payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: f64,
    pub tax: f64,
    pub total: f64,
    pub currency: String,
    pub method: PaymentMethod,
    /// Who was charged: "landlord" or "tenant".
    pub paid_by: String,
}

/// A screening resource as returned by the REST API.
///
/// Fields that only exist in later lifecycle states (`result`, `links`,
/// `completed_at`) stay `None` until the provider populates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screening {
    #[serde(flatten)]
    pub screening: ScreeningRef,
    pub tenant: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landlord: Option<Person>,
    pub property: Property,
    pub status: ScreeningStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ScreeningResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload for creating a screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateScreeningRequest {
    pub external_customer_id: String,
    pub external_tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_deal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_listing_id: Option<String>,
    pub tenant: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landlord: Option<Person>,
    pub property: Property,
    /// Tenant phone number, when collected up front.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_phone: Option<String>,
    /// Tenant SIN for credit bureau matching, when collected up front.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_sin: Option<String>,
    /// Property postal code, when it is not part of `property.address`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl CreateScreeningRequest {
    /// Validates applicant fields locally before the request is sent.
    ///
    /// The provider enforces the same rules server-side (422); validating
    /// here gives the caller a typed error without a round trip.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.tenant.email)?;
        if let Some(landlord) = &self.landlord {
            validate_email(&landlord.email)?;
        }
        if let Some(phone) = &self.tenant_phone {
            validate_phone(phone)?;
        }
        if let Some(sin) = &self.tenant_sin {
            validate_sin(sin)?;
        }
        if let Some(postal_code) = &self.postal_code {
            validate_postal_code(postal_code)?;
        }
        Ok(())
    }
}

/// Payload for inviting a tenant to complete a screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendInviteRequest {
    pub external_customer_id: String,
    pub external_tenant_id: String,
    pub tenant_email: String,
    /// Delivery channel, e.g. "email".
    pub invite_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_deal_id: Option<String>,
}

impl SendInviteRequest {
    /// Validates the invite locally before it is sent.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a malformed tenant email.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.tenant_email)
    }
}

/// Acknowledgement returned after an invite is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub tenant_email: String,
    pub invite_type: String,
    pub sent_at: DateTime<Utc>,
}

/// Query parameters for listing screenings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<ScreeningStatus>,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}
