use axum::{routing::post, Router};
use std::sync::Arc;
use tokenbridge_config::AppConfig;
use tracing::info;

use crate::client::ImportClient;
use crate::error::ImportError;
use crate::handlers::{import_tokens_handler, FirebaseState};

/// Create Firebase routes for the API
///
/// Builds an [`ImportClient`] from the configuration and mounts
/// `POST /firebase/import-apns-tokens`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, ImportError> {
    let client = ImportClient::from_config(&config)?;
    info!("Firebase routes initialized");
    Ok(routes_with_client(client))
}

/// Mounts the Firebase routes around an existing client
pub fn routes_with_client(client: ImportClient) -> Router {
    let state = Arc::new(FirebaseState {
        client: Arc::new(client),
    });

    Router::new()
        .route("/firebase/import-apns-tokens", post(import_tokens_handler))
        .with_state(state)
}
