//! Repeater configuration.
//!
//! [`RepeaterConfig`] is the runtime configuration handed to the server.
//! It is resolved at startup from, in order of precedence:
//!
//! 1. The `--listen` CLI argument.
//! 2. The persisted defaults file (TOML, `--config`), when present.
//! 3. The built-in default `0.0.0.0:8282`.
//!
//! Keeping the runtime configuration as a plain struct (no global state, no
//! environment reads inside the domain) keeps the server easy to embed in
//! integration tests.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured listen endpoint is not a valid socket address.
    #[error("invalid listen endpoint '{value}': {source}")]
    InvalidListenAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// All runtime configuration for the repeater.
#[derive(Debug, Clone)]
pub struct RepeaterConfig {
    /// The address and port the WebSocket server binds to.
    pub listen_addr: SocketAddr,
}

impl Default for RepeaterConfig {
    fn default() -> Self {
        Self {
            // Compile-time-known valid socket address string.
            listen_addr: "0.0.0.0:8282".parse().unwrap(),
        }
    }
}

/// The persisted defaults file schema.
///
/// ```toml
/// listen = "0.0.0.0:8282"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    /// The default listen endpoint used when no CLI argument is given.
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "0.0.0.0:8282".to_string()
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl FileConfig {
    /// Loads the persisted defaults from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<FileConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Converts the persisted defaults into a runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidListenAddr`] if the endpoint string is
    /// not a valid socket address.
    pub fn into_repeater_config(self) -> Result<RepeaterConfig, ConfigError> {
        let listen_addr = self
            .listen
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: self.listen.clone(),
                source,
            })?;
        Ok(RepeaterConfig { listen_addr })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listen_endpoint() {
        let config = RepeaterConfig::default();
        assert_eq!(config.listen_addr.port(), 8282);
        assert_eq!(config.listen_addr.ip().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_file_config_parses_listen_endpoint() {
        // Arrange / Act
        let file: FileConfig = toml::from_str(r#"listen = "127.0.0.1:9000""#).expect("parse");
        let config = file.into_repeater_config().expect("convert");

        // Assert
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_file_config_defaults_missing_listen() {
        let file: FileConfig = toml::from_str("").expect("parse");
        assert_eq!(file.listen, "0.0.0.0:8282");
    }

    #[test]
    fn test_invalid_listen_endpoint_is_a_typed_error() {
        let file = FileConfig {
            listen: "not-an-endpoint".to_string(),
        };
        let result = file.into_repeater_config();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidListenAddr { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_an_io_error() {
        let result = FileConfig::load(Path::new("/nonexistent/touchbridge.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_file_config_round_trips_through_toml() {
        let file = FileConfig {
            listen: "0.0.0.0:8282".to_string(),
        };
        let text = toml::to_string(&file).expect("serialize");
        let back: FileConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back, file);
    }
}
