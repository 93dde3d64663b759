// --- File: crates/tokenbridge_firebase/src/error.rs ---
use crate::batch::MAX_BATCH_SIZE;
use thiserror::Error;
use tokenbridge_common::{
    config_error, external_service_error, internal_error, not_found, validation_error,
    BridgeError,
};

/// Errors returned by the batch import pipeline.
///
/// Nothing in the pipeline logs these; the caller decides what to do with them.
#[derive(Error, Debug)]
pub enum ImportError {
    /// More tokens than the provider accepts in one call
    #[error("too many tokens in one batch: {count} (max {max})")]
    BatchTooLarge { count: usize, max: usize },

    /// Firebase is configured but neither the call nor the configuration carries a server key
    #[error("no Firebase server key configured")]
    MissingCredential,

    /// No Firebase configuration exists and the client runs in strict mode
    #[error("Firebase messaging is not configured")]
    NotConfigured,

    /// The import payload could not be serialized
    #[error("failed to encode batch import payload: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Connection, timeout or request construction failure from the HTTP client
    #[error("batch import request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `reason` is the provider's response text verbatim
    #[error("{reason}")]
    ProviderRejected { status: u16, reason: String },

    /// Non-2xx answer whose body is not valid UTF-8
    #[error("unable to decode error response")]
    UndecodableErrorBody { status: u16 },

    /// 2xx answer whose body is not a result envelope
    #[error("empty response")]
    MalformedResponse,
}

impl ImportError {
    pub(crate) fn batch_too_large(count: usize) -> Self {
        ImportError::BatchTooLarge {
            count,
            max: MAX_BATCH_SIZE,
        }
    }
}

/// Convert ImportError to BridgeError
///
/// The HTTP status of an import failure is the status of the resulting
/// `BridgeError` variant.
impl From<ImportError> for BridgeError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::BatchTooLarge { .. } => validation_error(err),
            ImportError::MissingCredential => config_error(err),
            ImportError::NotConfigured => BridgeError::ServiceUnavailable(err.to_string()),
            ImportError::Encoding(e) => internal_error(format!("batch import encoding: {}", e)),
            ImportError::Transport(e) => external_service_error("Firebase", e),
            ImportError::ProviderRejected { reason, .. } => internal_error(reason),
            ImportError::UndecodableErrorBody { .. } => internal_error(err),
            ImportError::MalformedResponse => not_found(err),
        }
    }
}
