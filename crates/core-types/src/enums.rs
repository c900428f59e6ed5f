use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl FromStr for Side {
    type Err = CoreError;

    /// Parses the exchange export's `Side` column. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(CoreError::InvalidInput("side".to_string(), s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// The join key of a row: a calendar date with no time-of-day or timezone.
///
/// A raw date string that could not be parsed is kept as `Unparsed` rather
/// than collapsed into a sentinel, so join and sort logic has to handle the
/// "no match" case explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum CalendarDate {
    Parsed(NaiveDate),
    Unparsed(String),
}

impl CalendarDate {
    /// The parsed date, or `None` if the raw value was unparseable.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CalendarDate::Parsed(date) => Some(*date),
            CalendarDate::Unparsed(_) => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, CalendarDate::Parsed(_))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate::Parsed(date)
    }
}
