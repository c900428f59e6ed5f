use crate::engine::MetricsEngine;
use crate::format::HeadlineCards;
use crate::join::inner_join;
use crate::report::DashboardReport;
use configuration::DataSources;
use core_types::JoinedRecord;
use dataset::{LoadReport, SentimentTable, TradeTable, load_sentiment, load_trades};
use serde::Serialize;

/// The fully computed dashboard: joined table, metrics and load diagnostics.
///
/// Built once at startup and never mutated afterwards, so it can be shared
/// between readers behind an `Arc` without locking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub joined: Vec<JoinedRecord>,
    pub report: DashboardReport,
    pub trades_load: LoadReport,
    pub sentiment_load: LoadReport,
}

impl Dashboard {
    /// Loads both sources, joins them and computes every metric.
    ///
    /// A source that cannot be loaded is replaced by an empty table and the
    /// failure is recorded in its `LoadReport`. This never fails.
    pub fn build(sources: &DataSources) -> Self {
        let trades_name = sources.trades_path.display().to_string();
        let trades = load_trades(&sources.trades_path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Trade log unavailable, continuing with an empty table.");
            TradeTable {
                report: LoadReport::failed(&trades_name, &e),
                ..TradeTable::empty(&trades_name)
            }
        });

        let sentiment_name = sources.sentiment_path.display().to_string();
        let sentiment = load_sentiment(&sources.sentiment_path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Sentiment index unavailable, continuing with an empty table.");
            SentimentTable {
                report: LoadReport::failed(&sentiment_name, &e),
                ..SentimentTable::empty(&sentiment_name)
            }
        });

        Self::from_tables(trades, sentiment)
    }

    /// Joins two already loaded tables and computes every metric.
    pub fn from_tables(trades: TradeTable, sentiment: SentimentTable) -> Self {
        if sentiment.report.duplicate_dates > 0 {
            tracing::warn!(
                duplicates = sentiment.report.duplicate_dates,
                "Sentiment index repeats dates; the first row for each date is used."
            );
        }

        let joined = inner_join(&trades.rows, &sentiment.rows);
        let report = MetricsEngine::new().calculate(&joined);

        tracing::info!(
            trades = trades.rows.len(),
            joined = report.trade_count,
            total_pnl = %report.total_pnl,
            "Dashboard data ready."
        );

        Self {
            joined,
            report,
            trades_load: trades.report,
            sentiment_load: sentiment.report,
        }
    }

    pub fn headline(&self) -> HeadlineCards {
        HeadlineCards::from_report(&self.report)
    }
}
