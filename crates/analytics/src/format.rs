use crate::report::DashboardReport;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Shown wherever a metric is undefined for an empty table.
pub const NOT_AVAILABLE: &str = "N/A";

/// Whether the headline PnL card reads as a gain or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PnlTone {
    Profit,
    Loss,
}

impl PnlTone {
    /// Only a strictly positive total counts as profit.
    pub fn of(total: Decimal) -> Self {
        if total > Decimal::ZERO {
            PnlTone::Profit
        } else {
            PnlTone::Loss
        }
    }
}

/// The three summary cards at the top of the dashboard, raw and display-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineCards {
    pub total_pnl: Decimal,
    pub total_pnl_display: String,
    pub tone: PnlTone,
    pub trade_count: usize,
    pub trade_count_display: String,
    pub win_rate: Option<Decimal>,
    pub win_rate_display: String,
}

impl HeadlineCards {
    pub fn from_report(report: &DashboardReport) -> Self {
        Self {
            total_pnl: report.total_pnl,
            total_pnl_display: currency(report.total_pnl),
            tone: PnlTone::of(report.total_pnl),
            trade_count: report.trade_count,
            trade_count_display: count(report.trade_count),
            win_rate: report.win_rate,
            win_rate_display: percent(report.win_rate),
        }
    }
}

/// `$1,234.56`, or `-$1,234.56` for losses.
pub fn currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// `12,345`.
pub fn count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// A fraction rendered with one decimal place, `0.5512` -> `55.1%`.
pub fn percent(fraction: Option<Decimal>) -> String {
    match fraction {
        Some(f) => {
            let pct = (f * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!("{pct:.1}%")
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
