// --- File: crates/tokenbridge_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Base URL of the instance-id service that hosts the batch import endpoint.
pub const DEFAULT_FIREBASE_BASE_URL: &str = "https://iid.googleapis.com/iid/v1";

/// Marker value that `apply_env_overrides_from_marker` swaps for an environment variable.
pub const SECRET_FROM_ENV: &str = "secret_from_env";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// How credential resolution behaves when no Firebase section was configured.
///
/// `Strict` turns the missing section into an error; `Lenient` lets every
/// registration call succeed with an empty result and no network traffic.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    #[default]
    Strict,
    Lenient,
}

// --- Firebase Config ---
// Holds the application identity and the legacy server key used for batch import.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FirebaseConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub app_bundle_id: String, // Mandatory
    #[serde(default)]
    pub server_key: Option<String>, // Usually "secret_from_env" -> FIREBASE_SERVER_KEY
    #[serde(default)]
    pub use_sandbox: bool,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_FIREBASE_BASE_URL.to_string()
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_firebase: bool,
    #[serde(default)]
    pub credential_mode: CredentialMode,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
}

impl AppConfig {
    /// Base URL for the provider, falling back to the public endpoint when
    /// no Firebase section is present.
    pub fn firebase_base_url(&self) -> &str {
        self.firebase
            .as_ref()
            .map(|firebase| firebase.base_url.as_str())
            .unwrap_or(DEFAULT_FIREBASE_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn from_toml(source: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .expect("config should build")
            .try_deserialize()
            .expect("config should deserialize")
    }

    #[test]
    fn test_firebase_defaults() {
        let config = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8086

            [firebase]
            app_bundle_id = "com.example.app"
            "#,
        );

        assert!(!config.use_firebase);
        assert_eq!(config.credential_mode, CredentialMode::Strict);
        let firebase = config.firebase.as_ref().expect("firebase section");
        assert_eq!(firebase.base_url, DEFAULT_FIREBASE_BASE_URL);
        assert_eq!(firebase.server_key, None);
        assert!(!firebase.use_sandbox);
        assert_eq!(firebase.timeout_secs, None);
    }

    #[test]
    fn test_lenient_mode_without_firebase_section() {
        let config = from_toml(
            r#"
            credential_mode = "lenient"
            use_firebase = true

            [server]
            host = "0.0.0.0"
            port = 80
            "#,
        );

        assert_eq!(config.credential_mode, CredentialMode::Lenient);
        assert!(config.firebase.is_none());
        assert_eq!(config.firebase_base_url(), DEFAULT_FIREBASE_BASE_URL);
    }
}
