use std::path::PathBuf;
use thiserror::Error;

/// A source that could not be loaded at all.
///
/// Row-level problems never surface here; they are counted in the
/// `LoadReport` instead.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open data source '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV from '{source_name}': {error}")]
    Csv {
        source_name: String,
        #[source]
        error: csv::Error,
    },

    #[error("Data source '{source_name}' is missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },
}
