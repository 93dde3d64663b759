//! Server key resolution for batch import calls
//!
//! The resolver holds the process configuration read-only behind an `Arc`,
//! so clones of a client share it without locking.

use crate::error::ImportError;
use std::sync::Arc;
use tokenbridge_config::{AppConfig, CredentialMode, FirebaseConfig, SECRET_FROM_ENV};

/// Application identity and default server key taken from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialConfiguration {
    pub app_bundle_id: String,
    pub server_key: Option<String>,
    pub use_sandbox: bool,
}

impl From<&FirebaseConfig> for CredentialConfiguration {
    fn from(config: &FirebaseConfig) -> Self {
        Self {
            app_bundle_id: config.app_bundle_id.clone(),
            server_key: config.server_key.clone(),
            use_sandbox: config.use_sandbox,
        }
    }
}

/// Result of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Server key to send in the `Authorization` header
    Resolved(String),
    /// No configuration in lenient mode; the call yields an empty result
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct CredentialResolver {
    configuration: Option<Arc<CredentialConfiguration>>,
    mode: CredentialMode,
}

impl CredentialResolver {
    pub fn new(configuration: Option<CredentialConfiguration>, mode: CredentialMode) -> Self {
        Self {
            configuration: configuration.map(Arc::new),
            mode,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.firebase.as_ref().map(CredentialConfiguration::from),
            config.credential_mode,
        )
    }

    pub fn configuration(&self) -> Option<&CredentialConfiguration> {
        self.configuration.as_deref()
    }

    pub fn mode(&self) -> CredentialMode {
        self.mode
    }

    /// Resolves the server key for one call.
    ///
    /// Configuration is checked first, so an explicit key never bypasses an
    /// uninitialized setup. Once configuration exists, `explicit` wins over
    /// the configured key. Blank values and an unresolved `secret_from_env`
    /// marker count as absent.
    ///
    /// # Errors
    ///
    /// * `NotConfigured` when there is no configuration and the mode is strict
    /// * `MissingCredential` when configuration exists but neither source holds a key
    pub fn resolve(&self, explicit: Option<&str>) -> Result<Resolution, ImportError> {
        let Some(configuration) = self.require_configuration()? else {
            return Ok(Resolution::Unavailable);
        };

        usable(explicit)
            .or_else(|| usable(configuration.server_key.as_deref()))
            .map(|key| Resolution::Resolved(key.to_string()))
            .ok_or(ImportError::MissingCredential)
    }

    /// Configuration for calls that take their identity from it.
    ///
    /// `Ok(None)` means lenient mode without configuration.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when there is no configuration and the mode is strict
    pub fn require_configuration(&self) -> Result<Option<&CredentialConfiguration>, ImportError> {
        match (self.configuration(), self.mode) {
            (Some(configuration), _) => Ok(Some(configuration)),
            (None, CredentialMode::Lenient) => Ok(None),
            (None, CredentialMode::Strict) => Err(ImportError::NotConfigured),
        }
    }
}

fn usable(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|key| !key.is_empty() && *key != SECRET_FROM_ENV)
}
