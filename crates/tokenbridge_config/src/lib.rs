use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;

pub mod env_vars;
pub mod models;

pub use models::*;

use env_vars::{get_config_prefix, inject_env_vars, CONFIG_SEPARATOR};

/// Loads the layered application configuration.
///
/// Sources, later ones winning:
/// 1. `<CONFIG_DIR>/default` (optional, any format the `config` crate understands)
/// 2. `<CONFIG_DIR>/<RUN_ENV>` (optional, `RUN_ENV` defaults to `debug`)
/// 3. `<PREFIX>__SECTION__KEY` environment variables (`PREFIX` defaults to `TOKENBRIDGE`)
///
/// `"secret_from_env"` markers are resolved last.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let prefix = get_config_prefix();

    let builder = Config::builder()
        .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
        .add_source(File::with_name(&format!("{config_dir}/{run_env}")).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(CONFIG_SEPARATOR));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_vars(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file named by `DOTENV_OVERRIDE` wins, then a first command line
/// argument starting with `.env`, then plain `.env`. Loading happens once per
/// process; a missing file is not an error.
///
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(server_key: Option<&str>) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8086,
            },
            use_firebase: true,
            credential_mode: CredentialMode::Strict,
            firebase: Some(FirebaseConfig {
                base_url: DEFAULT_FIREBASE_BASE_URL.to_string(),
                app_bundle_id: "com.example.app".to_string(),
                server_key: server_key.map(str::to_string),
                use_sandbox: false,
                timeout_secs: None,
            }),
        }
    }

    #[test]
    fn test_apply_env_overrides_resolves_server_key() {
        env::set_var("TOKENBRIDGE_SECRET_FIREBASE_SERVER_KEY", "from-env");

        let config = apply_env_overrides_from_marker(sample_config(Some(SECRET_FROM_ENV)))
            .expect("overrides should apply");
        let firebase = config.firebase.expect("firebase section");
        assert_eq!(firebase.server_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_apply_env_overrides_leaves_plain_values() {
        let config = apply_env_overrides_from_marker(sample_config(Some("inline-key")))
            .expect("overrides should apply");
        let firebase = config.firebase.expect("firebase section");
        assert_eq!(firebase.server_key.as_deref(), Some("inline-key"));
        assert_eq!(firebase.app_bundle_id, "com.example.app");
    }

    #[test]
    fn test_ensure_dotenv_loaded_is_idempotent() {
        let first = ensure_dotenv_loaded();
        let second = ensure_dotenv_loaded();
        assert_eq!(first, second);
    }
}
