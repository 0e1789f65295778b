//! Client SDK for the SingleKey tenant screening API.
//!
//! This crate wraps the provider's REST API and webhook notifications:
//! - Authenticated screening, invite, and report operations ([`api`])
//! - Report completion polling and status streams ([`api::PollPolicy`],
//!   [`SingleKey::watch`])
//! - Signed webhook verification, decoding, and dispatch ([`webhook`])
//! - Applicant field validation ([`validation`])
//!
//! # Calling the API
//!
//! ```no_run
//! use singlekey::{Config, SingleKey};
//! use singlekey::api::PollPolicy;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Logging is plain `tracing`; install any subscriber you like.
//! tracing_subscriber::fmt().with_env_filter("singlekey=debug").init();
//!
//! // Reads SINGLEKEY_API_TOKEN (and optional overrides)
//! let config = Config::from_env()?;
//! let client = SingleKey::new(&config)?;
//!
//! let screening = client.get_screening("pt_123").await?;
//! let finished = client
//!     .wait_for_completion(&screening.screening.purchase_token, &PollPolicy::new())
//!     .await?;
//! let pdf = client.report_pdf(&finished.screening.purchase_token).await?;
//! # let _ = pdf;
//! # Ok(())
//! # }
//! ```
//!
//! # Receiving webhooks
//!
//! Feed the verifier the RAW request body and the two SingleKey headers;
//! re-serializing the JSON changes the bytes and breaks the signature.
//!
//! ```no_run
//! use singlekey::webhook::{EventKind, EventRouter, WebhookVerifier};
//!
//! # async fn handle(body: &str, signature: &str, timestamp: &str)
//! #     -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = WebhookVerifier::new("whsec_live_123");
//! let router: EventRouter<std::io::Error> = EventRouter::new()
//!     .on(EventKind::ScreeningCompleted, |event| async move {
//!         println!("report ready for {}", event.webhook_id);
//!         Ok(())
//!     });
//!
//! let event = verifier.decode(body, signature, timestamp)?;
//! router.dispatch(event).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod screening;
pub mod time;
pub mod validation;
pub mod webhook;

pub use api::{ApiError, SingleKey};
pub use config::Config;
pub use webhook::{EventRouter, WebhookEvent, WebhookVerifier};
