use crate::settings::Config;
use clap::Args;
use std::path::PathBuf;

/// Command-line overrides for the data sources, flattened into the binary's CLI.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceOverrides {
    /// Path to the trade log CSV (overrides `data.trades_path`).
    #[arg(long, global = true)]
    pub trades: Option<PathBuf>,

    /// Path to the fear & greed index CSV (overrides `data.sentiment_path`).
    #[arg(long, global = true)]
    pub sentiment: Option<PathBuf>,
}

impl SourceOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.trades {
            config.data.trades_path = path.clone();
        }
        if let Some(path) = &self.sentiment {
            config.data.sentiment_path = path.clone();
        }
    }
}
