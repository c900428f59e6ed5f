use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataSources,
    pub server: Server,
    pub logging: Logging,
}

/// Locations of the two input tables.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSources {
    /// The exchange trade export (`Timestamp IST`, `Closed PnL`, `Side`, `Coin`, ...).
    pub trades_path: PathBuf,
    /// The daily fear & greed index (`date`, `classification`, ...).
    pub sentiment_path: PathBuf,
}

/// Where the read-only dashboard API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: IpAddr,
    pub port: u16,
}

impl Server {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default filter directive when `RUST_LOG` is not set (e.g. "info").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Rejects settings that would only fail later, at load or bind time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.trades_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.trades_path must not be empty".to_string(),
            ));
        }
        if self.data.sentiment_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.sentiment_path must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
