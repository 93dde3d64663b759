//! Logging utilities for the token bridge.
//!
//! The binary calls [`init`] once at startup; libraries only use the
//! `tracing` macros and never install a subscriber themselves.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events are shown when `RUST_LOG` is not set.
const WORKSPACE_TARGETS: &[&str] = &[
    "tokenbridge_backend",
    "tokenbridge_common",
    "tokenbridge_config",
    "tokenbridge_firebase",
    "tower_http",
];

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use tokenbridge_common::logging;
///
/// // Initialize with default log level (INFO)
/// logging::init();
///
/// // A second call is a no-op
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    // try_init: a global subscriber may already be installed (tests, embedding apps)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

fn default_filter(level: Level) -> EnvFilter {
    let directives = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(directives)
}

/// Log a result, with different messages for success and error cases.
///
/// Success is logged at INFO, failure at ERROR with `error_context` prepended.
/// The original result is returned so the call can sit inside a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let rendered = default_filter(Level::DEBUG).to_string().to_lowercase();
        assert!(rendered.contains("tokenbridge_firebase=debug"));
        assert!(rendered.contains("tower_http=debug"));
    }

    #[test]
    fn test_log_result_passes_through() {
        let ok: Result<u8, String> = log_result(Ok(7), "done", "failed");
        assert_eq!(ok, Ok(7));

        let err: Result<u8, String> = log_result(Err("boom".to_string()), "done", "failed");
        assert_eq!(err, Err("boom".to_string()));
    }
}
