//! APNs to Firebase Cloud Messaging token import
//!
//! This crate converts native APNs device tokens into Firebase registration
//! tokens through the instance-id batch import endpoint.
//!
//! # Features
//!
//! - Batch validation (1 to 100 tokens per call) before any network traffic
//! - Server key resolution: per-call key first, configured default second
//! - Strict or lenient handling of a missing Firebase configuration
//! - Per-token status: refused tokens come back with `is_registered == false`
//! - Calls can run on a caller-chosen Tokio runtime
//! - Integration with Axum for an HTTP endpoint
//! - OpenAPI/Swagger documentation (with the `openapi` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use tokenbridge_config::load_config;
//! use tokenbridge_firebase::ImportClient;
//!
//! async fn import() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config()?;
//!     let client = ImportClient::from_config(&config)?;
//!     let mappings = client.register_configured_tokens(["a1b2c3"]).await?;
//!     println!("{mappings:?}");
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /firebase/import-apns-tokens` - Import a batch of APNs tokens

pub mod batch;
pub mod client;
pub mod credentials;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;

pub use client::ImportClient;
pub use credentials::{CredentialConfiguration, CredentialResolver};
pub use error::ImportError;
pub use models::{RegistrationRequest, TokenMapping};
// Re-export the routes function to be used by the main backend service
pub use routes::routes;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::FirebaseApiDoc;
}
