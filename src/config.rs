//! Server configuration, parsed from the command line.

use clap::Parser;

/// respkv server
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "respkv")]
#[command(about = "A small RESP-speaking in-memory key-value server")]
#[command(version)]
pub struct Config {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = crate::DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = crate::DEFAULT_PORT)]
    pub port: u16,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "respkv=trace")
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: crate::DEFAULT_HOST.to_string(),
            port: crate::DEFAULT_PORT,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["respkv"]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_address(), "0.0.0.0:6379");
    }

    #[test]
    fn test_overrides() {
        let config =
            Config::try_parse_from(["respkv", "-H", "127.0.0.1", "--port", "6380", "--log-level", "debug"])
                .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:6380");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::try_parse_from(["respkv", "--port", "not-a-port"]).is_err());
        assert!(Config::try_parse_from(["respkv", "--port", "70000"]).is_err());
    }
}
