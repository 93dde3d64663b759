//! Firebase batch import client module
//!
//! This module provides a client for the instance-id batch import endpoint, which
//! converts native APNs device tokens into Firebase Cloud Messaging registration tokens.
//!
//! The main component is the `ImportClient` struct. A call runs through four stages,
//! each of which can end it early:
//!
//! 1. batch validation (`crate::batch`)
//! 2. server key resolution (`crate::credentials`)
//! 3. request building and dispatch (this module)
//! 4. response classification (`crate::response`)

use crate::batch::{validate_batch, BatchCheck};
use crate::credentials::{CredentialResolver, Resolution};
use crate::error::ImportError;
use crate::models::{RegistrationRequest, TokenImportPayload, TokenMapping};
use crate::response::interpret_response;
use reqwest::{header, Client, Request, Response};
use tokenbridge_common::create_client;
use tokenbridge_config::AppConfig;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Path of the batch import endpoint below the configured base URL
pub const BATCH_IMPORT_PATH: &str = "batchImport";

/// Client for the Firebase batch import endpoint
///
/// Cloning is cheap: clones share the HTTP connection pool and the read-only
/// credential configuration, so one client can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct ImportClient {
    /// HTTP client used to reach the provider
    client: Client,

    /// Provider base URL without a trailing slash
    base_url: String,

    /// Source of the server key and configured application identity
    resolver: CredentialResolver,
}

impl ImportClient {
    /// Creates a new client that talks to `base_url` with reqwest's default client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Provider base URL, e.g. `https://iid.googleapis.com/iid/v1`
    /// * `resolver` - Credential resolver holding the configured defaults
    pub fn new(base_url: impl Into<String>, resolver: CredentialResolver) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resolver,
        }
    }

    /// Creates a client from the application configuration
    ///
    /// A configured `firebase.timeout_secs` builds a dedicated HTTP client with
    /// that timeout; otherwise reqwest's defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ImportError> {
        let import_client = Self::new(
            config.firebase_base_url(),
            CredentialResolver::from_config(config),
        );

        match config.firebase.as_ref().and_then(|firebase| firebase.timeout_secs) {
            Some(timeout_secs) => {
                Ok(import_client.with_http_client(create_client(timeout_secs, true)?))
            }
            None => Ok(import_client),
        }
    }

    /// Replaces the HTTP client, e.g. to share a pool with the rest of an application
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    /// Full URL of the batch import endpoint
    pub fn batch_import_url(&self) -> String {
        format!("{}/{}", self.base_url, BATCH_IMPORT_PATH)
    }

    /// Builds the HTTP request for a validated batch
    ///
    /// The request is a `POST` to [`Self::batch_import_url`] with
    /// `Authorization: key=<server_key>`, `Content-Type: application/json` and a
    /// [`TokenImportPayload`] body.
    ///
    /// # Errors
    ///
    /// * `ImportError::Encoding` if the payload cannot be serialized
    /// * `ImportError::Transport` if reqwest rejects the URL or a header value
    pub fn build_request(
        &self,
        request: &RegistrationRequest,
        server_key: &str,
    ) -> Result<Request, ImportError> {
        let payload = TokenImportPayload::for_request(request);
        let body = serde_json::to_vec(&payload).map_err(ImportError::Encoding)?;

        let http_request = self
            .client
            .post(self.batch_import_url())
            .header(header::AUTHORIZATION, format!("key={}", server_key))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .build()?;

        Ok(http_request)
    }

    /// Sends a built request and returns the raw response
    ///
    /// No retries and no timeout beyond the HTTP client's own; connection
    /// failures come back as `ImportError::Transport`.
    pub async fn dispatch(&self, request: Request) -> Result<Response, ImportError> {
        debug!(url = %request.url(), "dispatching batch import");
        Ok(self.client.execute(request).await?)
    }

    /// Imports a batch of native tokens and returns one mapping per provider result
    ///
    /// # Arguments
    ///
    /// * `request` - Application identity, optional per-call server key, sandbox flag and tokens
    ///
    /// # Returns
    ///
    /// * `Ok(vec![])` without any network traffic when the batch is empty, or when
    ///   no Firebase configuration exists in lenient mode and the request has no key
    /// * `Ok(mappings)` when the provider answers 2xx with a result envelope; tokens the
    ///   provider refused are included with `is_registered == false`
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// * The batch holds more than 100 tokens (`BatchTooLarge`, before any I/O)
    /// * No server key can be resolved (`MissingCredential` / `NotConfigured`)
    /// * The HTTP request fails (`Transport`)
    /// * The provider answers outside 2xx (`ProviderRejected` / `UndecodableErrorBody`)
    /// * A 2xx body is not a result envelope (`MalformedResponse`)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tokenbridge_config::CredentialMode;
    /// use tokenbridge_firebase::client::ImportClient;
    /// use tokenbridge_firebase::credentials::CredentialResolver;
    /// use tokenbridge_firebase::models::RegistrationRequest;
    ///
    /// async fn import() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ImportClient::new(
    ///         "https://iid.googleapis.com/iid/v1",
    ///         CredentialResolver::new(None, CredentialMode::Strict),
    ///     );
    ///
    ///     let request = RegistrationRequest::new("com.example.app", ["a1b2c3", "d4e5f6"])
    ///         .with_server_key("AAAA-server-key");
    ///
    ///     for mapping in client.register_tokens(request).await? {
    ///         println!("{} -> {}", mapping.native_token, mapping.provider_token);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn register_tokens(
        &self,
        request: RegistrationRequest,
    ) -> Result<Vec<TokenMapping>, ImportError> {
        if validate_batch(&request.tokens)? == BatchCheck::Empty {
            return Ok(Vec::new());
        }

        let server_key = match self.resolver.resolve(request.server_key.as_deref())? {
            Resolution::Resolved(key) => key,
            Resolution::Unavailable => return Ok(Vec::new()),
        };

        debug!(
            application = %request.application,
            tokens = request.tokens.len(),
            "importing native tokens"
        );

        let http_request = self.build_request(&request, &server_key)?;
        let response = self.dispatch(http_request).await?;
        interpret_response(response).await
    }

    /// Imports tokens for the configured application
    ///
    /// The application identity and sandbox flag come from the Firebase
    /// configuration, the server key from the configuration's default.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register_tokens`]; without configuration this is
    /// `NotConfigured` in strict mode and an empty result in lenient mode.
    pub async fn register_configured_tokens<I, T>(
        &self,
        tokens: I,
    ) -> Result<Vec<TokenMapping>, ImportError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if validate_batch(&tokens)? == BatchCheck::Empty {
            return Ok(Vec::new());
        }

        let Some(configuration) = self.resolver.require_configuration()? else {
            return Ok(Vec::new());
        };

        let request = RegistrationRequest::new(configuration.app_bundle_id.clone(), tokens)
            .with_sandbox(configuration.use_sandbox);
        self.register_tokens(request).await
    }

    /// Runs [`Self::register_tokens`] as a task on the given runtime
    ///
    /// With `runtime == None` the task goes to the ambient runtime, whose
    /// scheduler picks the worker. Dropping the handle does not cancel the
    /// task; call `abort` on it for that.
    ///
    /// # Panics
    ///
    /// Panics when `runtime` is `None` and the caller is not inside a Tokio runtime.
    pub fn spawn_register(
        &self,
        request: RegistrationRequest,
        runtime: Option<&Handle>,
    ) -> JoinHandle<Result<Vec<TokenMapping>, ImportError>> {
        let import_client = self.clone();
        let task = async move { import_client.register_tokens(request).await };

        match runtime {
            Some(handle) => handle.spawn(task),
            None => tokio::spawn(task),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialConfiguration;
    use tokenbridge_config::CredentialMode;

    fn client(base_url: &str) -> ImportClient {
        ImportClient::new(
            base_url,
            CredentialResolver::new(
                Some(CredentialConfiguration {
                    app_bundle_id: "com.example.app".to_string(),
                    server_key: Some("configured-key".to_string()),
                    use_sandbox: false,
                }),
                CredentialMode::Strict,
            ),
        )
    }

    #[test]
    fn test_batch_import_url_trims_trailing_slash() {
        assert_eq!(
            client("https://iid.example.com/iid/v1/").batch_import_url(),
            "https://iid.example.com/iid/v1/batchImport"
        );
    }

    #[test]
    fn test_build_request() {
        let request = RegistrationRequest::new("com.example.app", ["t1"]).with_sandbox(true);
        let http_request = client("https://iid.example.com/iid/v1")
            .build_request(&request, "secret")
            .expect("request builds");

        assert_eq!(http_request.method(), reqwest::Method::POST);
        assert_eq!(
            http_request.url().as_str(),
            "https://iid.example.com/iid/v1/batchImport"
        );
        assert_eq!(
            http_request.headers()[header::AUTHORIZATION],
            "key=secret"
        );
        assert_eq!(
            http_request.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = http_request
            .body()
            .and_then(|body| body.as_bytes())
            .expect("buffered body");
        let json: serde_json::Value = serde_json::from_slice(body).expect("json body");
        assert_eq!(json["sandbox"], false);
        assert_eq!(json["apns_tokens"], serde_json::json!(["t1"]));
    }

    #[test]
    fn test_build_request_rejects_invalid_header() {
        let request = RegistrationRequest::new("com.example.app", ["t1"]);
        let result = client("https://iid.example.com/iid/v1").build_request(&request, "bad\nkey");
        assert!(matches!(result, Err(ImportError::Transport(_))));
    }

    #[tokio::test]
    async fn test_validation_precedes_credentials() {
        let unconfigured = ImportClient::new(
            "http://127.0.0.1:9",
            CredentialResolver::new(None, CredentialMode::Strict),
        );

        let tokens: Vec<String> = (0..101).map(|i| format!("t{i}")).collect();
        let result = unconfigured
            .register_tokens(RegistrationRequest::new("com.example.app", tokens))
            .await;
        assert!(matches!(result, Err(ImportError::BatchTooLarge { .. })));

        let empty = unconfigured
            .register_tokens(RegistrationRequest::new("com.example.app", Vec::<String>::new()))
            .await
            .expect("empty batch succeeds");
        assert!(empty.is_empty());
    }
}
