use crate::error::LoadError;
use crate::normalize::{parse_flexible_date, parse_trade_timestamp};
use crate::report::LoadReport;
use core_types::{CalendarDate, SentimentRecord, Side, TradeRecord};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

pub const COL_TIMESTAMP: &str = "Timestamp IST";
pub const COL_CLOSED_PNL: &str = "Closed PnL";
pub const COL_SIDE: &str = "Side";
pub const COL_COIN: &str = "Coin";
pub const COL_DATE: &str = "date";
pub const COL_CLASSIFICATION: &str = "classification";

/// The parsed trade log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeTable {
    pub rows: Vec<TradeRecord>,
    pub report: LoadReport,
}

impl TradeTable {
    /// A zero-row table standing in for a source that could not be loaded.
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            report: LoadReport::new(source),
        }
    }
}

/// The parsed sentiment index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentTable {
    pub rows: Vec<SentimentRecord>,
    pub report: LoadReport,
}

impl SentimentTable {
    /// A zero-row table standing in for a source that could not be loaded.
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            report: LoadReport::new(source),
        }
    }
}

/// Loads the trade log from a CSV file.
pub fn load_trades(path: &Path) -> Result<TradeTable, LoadError> {
    let file = open(path)?;
    read_trades(file, &path.display().to_string())
}

/// Loads the sentiment index from a CSV file.
pub fn load_sentiment(path: &Path) -> Result<SentimentTable, LoadError> {
    let file = open(path)?;
    read_sentiment(file, &path.display().to_string())
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a trade log from any CSV reader. `source_name` is used in errors and logs.
pub fn read_trades<R: Read>(reader: R, source_name: &str) -> Result<TradeTable, LoadError> {
    let mut reader = csv_reader(reader);
    let columns = HeaderIndex::read(&mut reader, source_name)?;

    let timestamp_idx = columns.require(COL_TIMESTAMP)?;
    let pnl_idx = columns.require(COL_CLOSED_PNL)?;
    let side_idx = columns.require(COL_SIDE)?;
    let coin_idx = columns.require(COL_COIN)?;

    let mut report = LoadReport::new(source_name);
    let mut rows = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let Some(record) = next_record(record, source_name, line)? else {
            report.rows_read += 1;
            report.skipped_rows += 1;
            continue;
        };
        report.rows_read += 1;

        let field = |idx: usize| record.get(idx).map(str::trim);

        let (Some(timestamp), Some(pnl_raw), Some(side_raw), Some(coin)) = (
            field(timestamp_idx),
            field(pnl_idx),
            field(side_idx),
            field(coin_idx),
        ) else {
            tracing::debug!(source = source_name, line, "Trade row is missing fields, skipping.");
            report.skipped_rows += 1;
            continue;
        };

        let closed_pnl = parse_decimal(pnl_raw);
        if closed_pnl.is_none() {
            tracing::debug!(source = source_name, line, value = pnl_raw, "Missing Closed PnL, keeping row without a value.");
            report.missing_pnl += 1;
        }

        let side = match Side::from_str(side_raw) {
            Ok(side) => Some(side),
            Err(e) => {
                tracing::debug!(source = source_name, line, error = %e, "Unknown trade side, keeping row without a side.");
                report.unknown_sides += 1;
                None
            }
        };

        let date = parse_trade_timestamp(timestamp);
        if !date.is_parsed() {
            report.unparsed_dates += 1;
        }

        rows.push(TradeRecord {
            timestamp: timestamp.to_string(),
            side,
            coin: coin.to_string(),
            closed_pnl,
            date,
        });
    }

    report.rows_loaded = rows.len();
    log_report("trade log", &report);
    Ok(TradeTable { rows, report })
}

/// Parses a sentiment index from any CSV reader. `source_name` is used in errors and logs.
pub fn read_sentiment<R: Read>(reader: R, source_name: &str) -> Result<SentimentTable, LoadError> {
    let mut reader = csv_reader(reader);
    let columns = HeaderIndex::read(&mut reader, source_name)?;

    let date_idx = columns.require(COL_DATE)?;
    let classification_idx = columns.require(COL_CLASSIFICATION)?;

    let mut report = LoadReport::new(source_name);
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for (line, record) in reader.records().enumerate() {
        let Some(record) = next_record(record, source_name, line)? else {
            report.rows_read += 1;
            report.skipped_rows += 1;
            continue;
        };
        report.rows_read += 1;

        let (Some(date_raw), Some(classification)) = (
            record.get(date_idx).map(str::trim),
            record.get(classification_idx).map(str::trim),
        ) else {
            tracing::debug!(source = source_name, line, "Sentiment row is missing fields, skipping.");
            report.skipped_rows += 1;
            continue;
        };

        let date = parse_flexible_date(date_raw);
        match &date {
            CalendarDate::Parsed(day) => {
                if !seen.insert(*day) {
                    report.duplicate_dates += 1;
                }
            }
            CalendarDate::Unparsed(_) => report.unparsed_dates += 1,
        }

        rows.push(SentimentRecord {
            date_raw: date_raw.to_string(),
            classification: classification.to_string(),
            date,
        });
    }

    report.rows_loaded = rows.len();
    log_report("sentiment index", &report);
    Ok(SentimentTable { rows, report })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

/// Unwraps one CSV record. I/O failures abort the load; a record that is
/// merely malformed (e.g. invalid UTF-8) yields `None` so the caller skips it.
fn next_record(
    record: csv::Result<csv::StringRecord>,
    source_name: &str,
    line: usize,
) -> Result<Option<csv::StringRecord>, LoadError> {
    match record {
        Ok(record) => Ok(Some(record)),
        Err(error) if error.is_io_error() => Err(LoadError::Csv {
            source_name: source_name.to_string(),
            error,
        }),
        Err(error) => {
            tracing::debug!(source = source_name, line, error = %error, "Malformed CSV row, skipping.");
            Ok(None)
        }
    }
}

/// Accepts plain (`-12.5`) and scientific (`1.2e-3`) notation. Blank is `None`.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn log_report(kind: &str, report: &LoadReport) {
    if report.is_clean() {
        tracing::info!(
            source = %report.source,
            rows = report.rows_loaded,
            "Loaded {kind}."
        );
    } else {
        tracing::warn!(
            source = %report.source,
            rows_read = report.rows_read,
            rows_loaded = report.rows_loaded,
            unparsed_dates = report.unparsed_dates,
            skipped_rows = report.skipped_rows,
            missing_pnl = report.missing_pnl,
            unknown_sides = report.unknown_sides,
            duplicate_dates = report.duplicate_dates,
            "Loaded {kind} with data quality issues."
        );
    }
}

/// Header name to column position lookup.
struct HeaderIndex<'a> {
    headers: Vec<String>,
    source_name: &'a str,
}

impl<'a> HeaderIndex<'a> {
    fn read<R: Read>(reader: &mut csv::Reader<R>, source_name: &'a str) -> Result<Self, LoadError> {
        let headers = reader
            .headers()
            .map_err(|error| LoadError::Csv {
                source_name: source_name.to_string(),
                error,
            })?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        Ok(Self {
            headers,
            source_name,
        })
    }

    fn require(&self, name: &str) -> Result<usize, LoadError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                source_name: self.source_name.to_string(),
                column: name.to_string(),
            })
    }
}
