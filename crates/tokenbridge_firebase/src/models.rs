//! Request, wire and result types for the batch import endpoint
//!
//! `RegistrationRequest` is what callers build; `TokenImportPayload` and
//! `TokenImportResponse` mirror the provider's JSON exactly; `TokenMapping`
//! is what a successful call hands back.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Status string the provider uses for a successfully imported token
pub const STATUS_OK: &str = "OK";

/// A batch of native tokens to import for one application
///
/// The request is consumed by the call that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Bundle identifier of the application the tokens belong to
    pub application: String,

    /// Server key for this call only; the configured key is used when `None`
    pub server_key: Option<String>,

    /// Whether the tokens come from the APNs sandbox environment
    pub sandbox: bool,

    /// Native device tokens, in caller order
    pub tokens: Vec<String>,
}

impl RegistrationRequest {
    /// Creates a request for `application` with production tokens and no explicit key
    ///
    /// # Example
    ///
    /// ```
    /// use tokenbridge_firebase::models::RegistrationRequest;
    ///
    /// let request = RegistrationRequest::new("com.example.app", ["a1b2", "c3d4"])
    ///     .with_server_key("AAAA-server-key");
    /// assert_eq!(request.tokens.len(), 2);
    /// ```
    pub fn new<I, T>(application: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            application: application.into(),
            server_key: None,
            sandbox: false,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_server_key(mut self, server_key: impl Into<String>) -> Self {
        self.server_key = Some(server_key.into());
        self
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

/// Body of `POST {base_url}/batchImport`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TokenImportPayload<'a> {
    pub application: &'a str,
    pub sandbox: bool,
    pub apns_tokens: &'a [String],
}

impl<'a> TokenImportPayload<'a> {
    /// Builds the wire payload for `request`.
    ///
    /// `sandbox` is always sent as `false`; `RegistrationRequest::sandbox` is
    /// not forwarded to the provider.
    pub fn for_request(request: &'a RegistrationRequest) -> Self {
        if request.sandbox {
            debug!(
                application = %request.application,
                "sandbox requested but batch import always sends sandbox=false"
            );
        }

        Self {
            application: &request.application,
            sandbox: false,
            apns_tokens: &request.tokens,
        }
    }
}

/// Success envelope returned by the provider
#[derive(Debug, Deserialize)]
pub struct TokenImportResponse {
    pub results: Vec<TokenImportResult>,
}

/// One entry of the success envelope
#[derive(Debug, Deserialize)]
pub struct TokenImportResult {
    /// Absent for tokens the provider refused
    #[serde(default)]
    pub registration_token: String,
    pub apns_token: String,
    pub status: String,
}

/// Mapping of one native token to its provider registration token
///
/// Results come back in provider order, which need not match the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenMapping {
    /// The native APNs token that was submitted
    pub native_token: String,

    /// The Firebase registration token issued for it
    pub provider_token: String,

    /// `true` when the provider reported status `OK`
    pub is_registered: bool,
}

impl From<TokenImportResult> for TokenMapping {
    fn from(result: TokenImportResult) -> Self {
        Self {
            is_registered: result.status == STATUS_OK,
            native_token: result.apns_token,
            provider_token: result.registration_token,
        }
    }
}
