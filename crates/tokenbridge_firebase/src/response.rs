//! Classification of batch import responses
//!
//! A 2xx answer must carry the result envelope; anything else is a rejection
//! whose body text becomes the error reason.

use crate::error::ImportError;
use crate::models::{TokenImportResponse, TokenMapping};
use reqwest::{Response, StatusCode};
use tracing::debug;

/// Reads the provider response and classifies it.
///
/// Failing to read the body at all is a transport error.
pub async fn interpret_response(response: Response) -> Result<Vec<TokenMapping>, ImportError> {
    let status = response.status();
    let body = response.bytes().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "batch import response received");
    classify(status, &body)
}

/// Maps a status code and raw body onto results or an error.
pub fn classify(status: StatusCode, body: &[u8]) -> Result<Vec<TokenMapping>, ImportError> {
    if status.is_success() {
        let envelope: TokenImportResponse =
            serde_json::from_slice(body).map_err(|_| ImportError::MalformedResponse)?;
        return Ok(envelope.results.into_iter().map(TokenMapping::from).collect());
    }

    match std::str::from_utf8(body) {
        Ok(reason) => Err(ImportError::ProviderRejected {
            status: status.as_u16(),
            reason: reason.to_string(),
        }),
        Err(_) => Err(ImportError::UndecodableErrorBody {
            status: status.as_u16(),
        }),
    }
}
