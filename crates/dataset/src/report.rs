use serde::{Deserialize, Serialize};

/// Row-level diagnostics collected while loading one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Display name of the source, usually its path.
    pub source: String,
    /// Data rows seen, excluding the header.
    pub rows_read: usize,
    /// Rows kept in the table.
    pub rows_loaded: usize,
    /// Kept rows whose date did not parse; these never join.
    pub unparsed_dates: usize,
    /// Rows dropped because the CSV record itself was short or malformed.
    pub skipped_rows: usize,
    /// Kept trades whose `Closed PnL` was blank or not a number.
    pub missing_pnl: usize,
    /// Kept trades whose `Side` was blank or unrecognised.
    pub unknown_sides: usize,
    /// Sentiment rows whose date was already present earlier in the file.
    pub duplicate_dates: usize,
    /// Set when the whole source failed to load and an empty table was used.
    pub failure: Option<String>,
}

impl LoadReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// The report of a source that could not be read at all.
    pub fn failed(source: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new(source)
        }
    }

    /// True when every row was loaded with all of its values.
    pub fn is_clean(&self) -> bool {
        self.failure.is_none()
            && self.unparsed_dates == 0
            && self.skipped_rows == 0
            && self.missing_pnl == 0
            && self.unknown_sides == 0
            && self.duplicate_dates == 0
    }
}
