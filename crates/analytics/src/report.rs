use crate::distribution::Distribution;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the dashboard displays about the joined table.
///
/// This struct is the final output of the `MetricsEngine` and serves as the
/// data transfer object for both the terminal summary and the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    // I. Headline Metrics
    pub total_pnl: Decimal,
    pub trade_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: Option<Decimal>, // Fraction in [0, 1]; None for 0 trades

    // II. Per-Sentiment Breakdowns
    /// In order of first appearance in the joined table.
    pub pnl_by_sentiment: Vec<SentimentPnl>,
    /// Sorted by classification label.
    pub win_rate_by_sentiment: Vec<SentimentWinRate>,

    // III. Time Series
    pub cumulative_pnl: Vec<CumulativePoint>,
}

/// Closed PnL values of one sentiment class, for the box-plot chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPnl {
    pub classification: String,
    /// Raw values in joined-table order.
    pub values: Vec<Decimal>,
    pub distribution: Distribution,
}

/// Share of winning trades within one sentiment class, for the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentWinRate {
    pub classification: String,
    pub trades: usize,
    pub win_rate: Decimal,
}

/// One step of the account growth line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub running_total: Decimal,
}

impl DashboardReport {
    /// The report of an empty joined table.
    pub fn new() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            trade_count: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: None,
            pnl_by_sentiment: Vec::new(),
            win_rate_by_sentiment: Vec::new(),
            cumulative_pnl: Vec::new(),
        }
    }
}

impl Default for DashboardReport {
    fn default() -> Self {
        Self::new()
    }
}
