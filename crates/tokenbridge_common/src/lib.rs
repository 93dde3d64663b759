// --- File: crates/tokenbridge_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, not_found, validation_error,
    BridgeError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, status_for, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result};

// Shared error handling, HTTP helpers and logging setup used across the workspace.
