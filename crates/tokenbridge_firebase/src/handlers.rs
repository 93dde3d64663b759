//! HTTP handlers for the batch import
//!
//! This module exposes the token import over a small REST API so that services
//! without a Rust toolchain can convert APNs tokens through the bridge.
//!
//! The handlers are designed to be used with the Axum web framework and include
//! OpenAPI documentation when the `openapi` feature is enabled.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokenbridge_common::{status_for, validation_error, BridgeError};
use tracing::{debug, error, info, warn};

use crate::client::ImportClient;
use crate::models::{RegistrationRequest, TokenMapping};

/// Shared state for Firebase handlers
#[derive(Clone)]
pub struct FirebaseState {
    /// The client used to import tokens
    pub client: Arc<ImportClient>,
}

/// Request body for importing APNs tokens
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImportTokensRequest {
    /// Bundle identifier of the application
    ///
    /// When omitted, the configured application, sandbox flag and server key
    /// are used, and `server_key` and `sandbox` must be omitted too.
    pub application: Option<String>,

    /// Server key for this call, overriding the configured one
    pub server_key: Option<String>,

    /// Whether the tokens come from the APNs sandbox
    pub sandbox: Option<bool>,

    /// Native APNs tokens, at most 100
    pub tokens: Vec<String>,
}

/// Response body for the import endpoint
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImportTokensResponse {
    /// Whether the provider accepted the batch
    pub success: bool,

    /// One entry per provider result; empty on failure
    pub results: Vec<TokenMapping>,

    /// Error message if the import failed
    pub error: Option<String>,
}

/// Handler for importing APNs tokens into Firebase
///
/// # Responses
///
/// - 200 OK: Batch accepted; individual tokens may still be unregistered
/// - 400 Bad Request: More than 100 tokens, or `server_key`/`sandbox` without `application`
/// - 404 Not Found: The provider answered without a result envelope
/// - 500 Internal Server Error: Provider rejection or missing server key
/// - 502 Bad Gateway: The provider could not be reached
/// - 503 Service Unavailable: Firebase is not configured
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/firebase/import-apns-tokens",
    request_body = ImportTokensRequest,
    responses(
        (status = 200, description = "Tokens imported", body = ImportTokensResponse),
        (status = 400, description = "Bad Request", body = ImportTokensResponse),
        (status = 404, description = "Empty provider response", body = ImportTokensResponse),
        (status = 500, description = "Internal Server Error", body = ImportTokensResponse),
        (status = 502, description = "Provider unreachable", body = ImportTokensResponse),
        (status = 503, description = "Firebase not configured", body = ImportTokensResponse)
    ),
    tag = "Firebase"
))]
pub async fn import_tokens_handler(
    State(state): State<Arc<FirebaseState>>,
    Json(payload): Json<ImportTokensRequest>,
) -> Response {
    debug!("Importing {} APNs tokens", payload.tokens.len());

    let result = match payload.application {
        Some(application) => {
            let mut request = RegistrationRequest::new(application, payload.tokens)
                .with_sandbox(payload.sandbox.unwrap_or(false));
            if let Some(server_key) = payload.server_key {
                request = request.with_server_key(server_key);
            }
            state.client.register_tokens(request).await
        }
        None if payload.server_key.is_some() || payload.sandbox.is_some() => {
            warn!("Rejected import: server_key or sandbox given without application");
            return failure(validation_error(
                "server_key and sandbox require an explicit application",
            ));
        }
        None => state.client.register_configured_tokens(payload.tokens).await,
    };

    match result {
        Ok(results) => {
            info!(
                "Imported {} tokens ({} registered)",
                results.len(),
                results.iter().filter(|mapping| mapping.is_registered).count()
            );
            Json(ImportTokensResponse {
                success: true,
                results,
                error: None,
            })
            .into_response()
        }
        Err(err) => {
            error!("Failed to import APNs tokens: {:?}", err);
            let reason = err.to_string();
            let status = status_for(&BridgeError::from(err));
            failure_response(status, reason)
        }
    }
}

fn failure(err: BridgeError) -> Response {
    failure_response(status_for(&err), err.to_string())
}

fn failure_response(status: StatusCode, reason: String) -> Response {
    (
        status,
        Json(ImportTokensResponse {
            success: false,
            results: Vec::new(),
            error: Some(reason),
        }),
    )
        .into_response()
}
