//! Logging setup utilities for the Hubbub hub.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the server library crates and the binary log at `default_log_level`.
/// The filter can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hubbub-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hubbub_shared::logger::setup_logger;
///
/// setup_logger("hubbub-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into());
    let directives = filter.to_string();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Logger initialized for '{}' with filter '{}'", binary_name, directives);
}

/// Build the default `EnvFilter` directive string.
///
/// Crate and binary names are normalized to their module form (`-` → `_`).
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "hubbub_server={level},hubbub_shared={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_contains_all_targets() {
        // テスト項目: デフォルトのフィルタにサーバー・共有ライブラリ・バイナリが含まれる
        // given (前提条件):
        let binary_name = "hubbub-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert!(filter.contains("hubbub_server=debug"));
        assert!(filter.contains("hubbub_shared=debug"));
        assert!(filter.contains("tower_http=debug"));
        // `-` is not a valid target character
        assert!(!filter.contains("hubbub-server"));
    }
}
