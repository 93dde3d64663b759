//! Environment variable handling for the token bridge.
//!
//! This module maps configuration paths onto environment variable names and
//! resolves `"secret_from_env"` markers left in a loaded configuration.

use crate::models::SECRET_FROM_ENV;
use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "TOKENBRIDGE";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "TOKENBRIDGE_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "firebase.base_url")
///
/// # Returns
///
/// The environment variable name (e.g., "TOKENBRIDGE__FIREBASE__BASE_URL")
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `firebase.server_key` becomes `TOKENBRIDGE_SECRET_FIREBASE_SERVER_KEY`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its unprefixed environment variable name
///
/// `firebase.server_key` becomes `FIREBASE_SERVER_KEY`, the name most
/// deployments already export.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Get an environment variable for a configuration path
pub fn get_config_env_var(path: &str) -> Option<String> {
    let env_var = config_path_to_env_var(path);
    env::var(&env_var).ok()
}

/// Get an environment variable for a secret path
///
/// The prefixed name is tried first, then the unprefixed one.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    let env_var = secret_path_to_env_var(path);
    if let Ok(value) = env::var(&env_var) {
        return Some(value);
    }

    let legacy_env_var = legacy_secret_path_to_env_var(path);
    env::var(&legacy_env_var).ok()
}

/// Check if a path is a secret path
///
/// Paths containing "secret", "key", "password" or "token" are considered secret.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("key")
        || path_lower.contains("password")
        || path_lower.contains("token")
}

/// Get an environment variable for a path, using the secret naming scheme
/// for secret paths.
pub fn get_env_var(path: &str) -> Option<String> {
    if is_secret_path(path) {
        get_secret_env_var(path)
    } else {
        get_config_env_var(path)
    }
}

/// Inject environment variables into a JSON value
///
/// Every `"secret_from_env"` string is replaced by the environment variable
/// derived from its path. Markers without a matching variable are left as-is.
///
/// # Returns
///
/// `true` if any values were replaced, `false` otherwise
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_FROM_ENV => {
                let path_str = path.join(".");
                if let Some(env_val) = get_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!("env var for {} not found", path_str);
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(
            config_path_to_env_var("server.host"),
            "TOKENBRIDGE__SERVER__HOST"
        );
        assert_eq!(
            config_path_to_env_var("firebase.base_url"),
            "TOKENBRIDGE__FIREBASE__BASE_URL"
        );
    }

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("firebase.server_key"),
            "TOKENBRIDGE_SECRET_FIREBASE_SERVER_KEY"
        );
    }

    #[test]
    fn test_legacy_secret_path_to_env_var() {
        assert_eq!(
            legacy_secret_path_to_env_var("firebase.server_key"),
            "FIREBASE_SERVER_KEY"
        );
        assert_eq!(legacy_secret_path_to_env_var("standalone"), "STANDALONE");
    }

    #[test]
    fn test_is_secret_path() {
        assert!(is_secret_path("firebase.server_key"));
        assert!(is_secret_path("provider.client_secret"));
        assert!(!is_secret_path("server.host"));
        assert!(!is_secret_path("firebase.app_bundle_id"));
    }

    #[test]
    fn test_inject_env_vars_prefers_prefixed_secret() {
        env::set_var("TOKENBRIDGE_SECRET_INJECTTEST_SERVER_KEY", "prefixed");
        env::set_var("INJECTTEST_SERVER_KEY", "legacy");

        let mut value = json!({ "injecttest": { "server_key": "secret_from_env" } });
        assert!(inject_env_vars(&mut value));
        assert_eq!(value["injecttest"]["server_key"], "prefixed");
    }

    #[test]
    fn test_inject_env_vars_keeps_marker_when_missing() {
        let mut value = json!({ "missingtest": { "server_key": "secret_from_env" }, "other": 1 });
        assert!(!inject_env_vars(&mut value));
        assert_eq!(value["missingtest"]["server_key"], SECRET_FROM_ENV);
    }
}
