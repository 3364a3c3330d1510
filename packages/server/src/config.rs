//! Command-line configuration for the hub server.

use clap::Parser;

/// Default listening port
pub const DEFAULT_PORT: u16 = 3027;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "hubbub-server")]
#[command(about = "Presence and signaling hub over WebSocket", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしでデフォルト設定になる
        // given (前提条件):
        let args = ["hubbub-server"];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3027);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.bind_addr(), "0.0.0.0:3027");
    }

    #[test]
    fn test_short_flags() {
        // テスト項目: 短いオプションでホストとポートを指定できる
        // given (前提条件):
        let args = ["hubbub-server", "-H", "127.0.0.1", "-p", "8080", "--log-level", "debug"];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        // テスト項目: 範囲外のポート番号はエラーになる
        // given (前提条件):
        let args = ["hubbub-server", "--port", "70000"];

        // when (操作):
        let result = ServerConfig::try_parse_from(args);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
