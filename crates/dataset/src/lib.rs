//! # Dataset Loader
//!
//! Reads the trade log and the sentiment index into typed rows and reduces
//! both native date formats to a common `CalendarDate` join key.
//!
//! Loading is fallible per source (`LoadError`) and lenient per row: a row
//! whose date cannot be parsed is kept with an unparsed date, and a trade
//! whose PnL or side is blank or unparseable is kept with that value set to
//! `None`. Only short or malformed CSV records are skipped. Every case is
//! counted in the source's `LoadReport`.

pub mod error;
pub mod loader;
pub mod normalize;
pub mod report;

pub use error::LoadError;
pub use loader::{
    SentimentTable, TradeTable, load_sentiment, load_trades, read_sentiment, read_trades,
};
pub use normalize::{parse_flexible_date, parse_trade_timestamp};
pub use report::LoadReport;
