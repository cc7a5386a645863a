use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::constants::{
    database::{DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_DB_PATH, DEFAULT_MAX_CONNECTIONS},
    server::{DEFAULT_HOST, DEFAULT_PORT},
    tron::DEFAULT_NETWORK,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub log_format: LogFormat,
    pub tron: TronConfig,
    pub database: DatabaseConfig,
}

/// Upstream Tron node settings
///
/// When both `token` and `provider` are set the client targets `provider` with the
/// token attached, otherwise it targets the public endpoint of `network`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TronConfig {
    pub network: String,
    pub token: Option<String>,
    pub provider: Option<String>,
    pub timeout_secs: Option<u64>,
    #[cfg(feature = "mocks")]
    #[serde(default)]
    pub mock_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file, or `:memory:`
    pub path: String,
    pub max_connections: Option<u32>,
    pub connection_timeout_secs: Option<u64>,
}

/// Output format of the log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Bunyan JSON lines
    Json,
    /// Human-readable lines
    Text,
    /// Text on a terminal, JSON otherwise
    #[default]
    Auto,
}

impl LogFormat {
    /// Resolve [`LogFormat::Auto`] against the current stdout
    pub fn resolve(self) -> Self {
        match self {
            LogFormat::Auto if std::io::stdout().is_terminal() => LogFormat::Text,
            LogFormat::Auto => LogFormat::Json,
            other => other,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            "auto" => Ok(LogFormat::Auto),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // these are just some sane defaults, most likely we will
        // have them overridden
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
            tron: TronConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for TronConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            token: None,
            provider: None,
            timeout_secs: None,
            #[cfg(feature = "mocks")]
            mock_mode: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
            connection_timeout_secs: Some(DEFAULT_CONNECTION_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
