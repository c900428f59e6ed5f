use crate::enums::{CalendarDate, Side};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One executed trade from the historical trade log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// The raw `Timestamp IST` value, `DD-MM-YYYY HH:MM`.
    pub timestamp: String,
    /// `None` when the export's `Side` cell is blank or unrecognised.
    pub side: Option<Side>,
    pub coin: String,
    /// `None` when the `Closed PnL` cell is blank or not a number.
    pub closed_pnl: Option<Decimal>,
    /// The calendar date derived from `timestamp`.
    pub date: CalendarDate,
}

impl TradeRecord {
    /// A trade counts as a win only when it closed with strictly positive PnL.
    pub fn win(&self) -> bool {
        self.closed_pnl.is_some_and(|pnl| pnl > Decimal::ZERO)
    }
}

/// One day of the market-sentiment index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// The raw `date` value, `YYYY-MM-DD`.
    pub date_raw: String,
    pub classification: String,
    pub date: CalendarDate,
}

/// A trade matched to the sentiment of its calendar day.
///
/// These six fields are the full shape of the joined table; an empty
/// `Vec<JoinedRecord>` is the "no data" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub date: NaiveDate,
    pub classification: String,
    pub closed_pnl: Option<Decimal>,
    pub win: bool,
    pub side: Option<Side>,
    pub coin: String,
}

impl JoinedRecord {
    pub fn new(trade: &TradeRecord, date: NaiveDate, classification: &str) -> Self {
        Self {
            date,
            classification: classification.to_string(),
            closed_pnl: trade.closed_pnl,
            win: trade.win(),
            side: trade.side,
            coin: trade.coin.clone(),
        }
    }

    /// The PnL this row adds to sums; a missing value adds nothing.
    pub fn pnl_or_zero(&self) -> Decimal {
        self.closed_pnl.unwrap_or(Decimal::ZERO)
    }
}
