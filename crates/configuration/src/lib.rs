use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::SourceOverrides;
pub use settings::{Config, DataSources, Logging, Server};

/// The file `load_config` reads when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Prefix for environment overrides, e.g. `DASH_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "DASH";

/// Loads the application configuration.
///
/// Sources are layered in increasing priority: built-in defaults, the TOML
/// file at `path` (or `dashboard.toml`; the file is optional), then
/// `DASH_*` environment variables. The result is validated before it is
/// returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    let builder = config::Config::builder()
        .set_default("data.trades_path", "historical_data_compressed.csv")?
        .set_default("data.sentiment_path", "fear_greed_index.csv")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8050_i64)?
        .set_default("logging.level", "info")?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}
