use crate::distribution::Distribution;
use crate::report::{CumulativePoint, DashboardReport, SentimentPnl, SentimentWinRate};
use core_types::JoinedRecord;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A stateless calculator for deriving dashboard metrics from the joined table.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating dashboard metrics.
    ///
    /// Every metric is defined on an empty table: sums are zero, the win rate
    /// is `None` and the grouped and time-series outputs are empty.
    pub fn calculate(&self, rows: &[JoinedRecord]) -> DashboardReport {
        let mut report = DashboardReport::new();

        if rows.is_empty() {
            return report;
        }

        self.calculate_headline(rows, &mut report);
        report.pnl_by_sentiment = self.pnl_by_sentiment(rows);
        report.win_rate_by_sentiment = self.win_rate_by_sentiment(rows);
        report.cumulative_pnl = self.cumulative_pnl(rows);

        report
    }

    /// Total PnL, trade counts and the overall win rate.
    fn calculate_headline(&self, rows: &[JoinedRecord], report: &mut DashboardReport) {
        report.trade_count = rows.len();

        for row in rows {
            report.total_pnl += row.pnl_or_zero();
            if row.win {
                report.winning_trades += 1;
            } else {
                report.losing_trades += 1;
            }
        }

        report.win_rate = ratio(report.winning_trades, report.trade_count);
    }

    /// Groups closed PnL by classification, keeping first-appearance order.
    ///
    /// Rows without a PnL value are left out of the distribution. A class
    /// whose rows all lack PnL has no box to draw and is omitted.
    pub fn pnl_by_sentiment(&self, rows: &[JoinedRecord]) -> Vec<SentimentPnl> {
        let mut groups: Vec<(&str, Vec<Decimal>)> = Vec::new();

        for row in rows {
            let Some(pnl) = row.closed_pnl else {
                continue;
            };
            match groups
                .iter_mut()
                .find(|(label, _)| *label == row.classification)
            {
                Some((_, values)) => values.push(pnl),
                None => groups.push((row.classification.as_str(), vec![pnl])),
            }
        }

        groups
            .into_iter()
            .filter_map(|(label, values)| {
                let distribution = Distribution::from_values(&values)?;
                Some(SentimentPnl {
                    classification: label.to_string(),
                    values,
                    distribution,
                })
            })
            .collect()
    }

    /// Mean of `win` per classification, sorted by label.
    pub fn win_rate_by_sentiment(&self, rows: &[JoinedRecord]) -> Vec<SentimentWinRate> {
        let mut tallies: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

        for row in rows {
            let (trades, wins) = tallies.entry(row.classification.as_str()).or_default();
            *trades += 1;
            if row.win {
                *wins += 1;
            }
        }

        tallies
            .into_iter()
            .map(|(label, (trades, wins))| SentimentWinRate {
                classification: label.to_string(),
                trades,
                win_rate: Decimal::from(wins) / Decimal::from(trades),
            })
            .collect()
    }

    /// Running PnL over rows stably sorted by date.
    ///
    /// Trades on the same day keep their joined-table order.
    pub fn cumulative_pnl(&self, rows: &[JoinedRecord]) -> Vec<CumulativePoint> {
        let mut ordered: Vec<&JoinedRecord> = rows.iter().collect();
        ordered.sort_by_key(|row| row.date);

        ordered
            .into_iter()
            .scan(Decimal::ZERO, |running_total, row| {
                *running_total += row.pnl_or_zero();
                Some(CumulativePoint {
                    date: row.date,
                    running_total: *running_total,
                })
            })
            .collect()
    }
}

/// `part / whole` as a fraction, or `None` when `whole` is zero.
fn ratio(part: usize, whole: usize) -> Option<Decimal> {
    if whole == 0 {
        return None;
    }
    Some(Decimal::from(part) / Decimal::from(whole))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Side;
    use rust_decimal_macros::dec;

    fn row(day: u32, label: &str, pnl: Decimal) -> JoinedRecord {
        JoinedRecord {
            date: NaiveDate::from_ymd_opt(2021, 2, day).unwrap(),
            classification: label.into(),
            closed_pnl: Some(pnl),
            win: pnl > Decimal::ZERO,
            side: Some(Side::Buy),
            coin: "BTC".into(),
        }
    }

    #[test]
    fn rows_without_pnl_count_as_losing_trades() {
        let mut blank = row(1, "Fear", Decimal::ZERO);
        blank.closed_pnl = None;
        let mut sideless = row(1, "Fear", dec!(-30));
        sideless.side = None;
        let rows = vec![row(1, "Fear", dec!(100)), sideless, blank];

        let report = MetricsEngine::new().calculate(&rows);
        assert_eq!(report.trade_count, 3);
        assert_eq!(report.total_pnl, dec!(70));
        assert_eq!(report.winning_trades, 1);
        assert_eq!(report.win_rate, Some(Decimal::ONE / Decimal::from(3)));
        assert_eq!(report.win_rate_by_sentiment[0].trades, 3);
        assert_eq!(report.pnl_by_sentiment[0].values, vec![dec!(100), dec!(-30)]);

        let totals: Vec<Decimal> = report.cumulative_pnl.iter().map(|p| p.running_total).collect();
        assert_eq!(totals, vec![dec!(100), dec!(70), dec!(70)]);
    }

    #[test]
    fn empty_table_degrades_to_defined_values() {
        let report = MetricsEngine::new().calculate(&[]);
        assert_eq!(report.total_pnl, Decimal::ZERO);
        assert_eq!(report.trade_count, 0);
        assert_eq!(report.win_rate, None);
        assert!(report.pnl_by_sentiment.is_empty());
        assert!(report.win_rate_by_sentiment.is_empty());
        assert!(report.cumulative_pnl.is_empty());
    }

    #[test]
    fn headline_metrics() {
        let rows = vec![row(1, "Fear", dec!(100)), row(1, "Fear", dec!(-30))];
        let report = MetricsEngine::new().calculate(&rows);

        assert_eq!(report.total_pnl, dec!(70));
        assert_eq!(report.trade_count, 2);
        assert_eq!(report.winning_trades, 1);
        assert_eq!(report.losing_trades, 1);
        assert_eq!(report.win_rate, Some(dec!(0.5)));
    }

    #[test]
    fn zero_pnl_is_not_a_win() {
        let rows = vec![row(1, "Greed", dec!(0)), row(2, "Greed", dec!(0))];
        let report = MetricsEngine::new().calculate(&rows);
        assert_eq!(report.win_rate, Some(Decimal::ZERO));
        assert_eq!(report.losing_trades, 2);
    }

    #[test]
    fn cumulative_series_is_stable_by_date() {
        let rows = vec![
            row(3, "Greed", dec!(10)),
            row(1, "Fear", dec!(100)),
            row(1, "Fear", dec!(-30)),
            row(2, "Neutral", dec!(5)),
        ];
        let series = MetricsEngine::new().cumulative_pnl(&rows);

        let totals: Vec<Decimal> = series.iter().map(|p| p.running_total).collect();
        assert_eq!(totals, vec![dec!(100), dec!(70), dec!(75), dec!(85)]);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
        assert_eq!(series[3].date, NaiveDate::from_ymd_opt(2021, 2, 3).unwrap());
    }

    #[test]
    fn last_cumulative_point_equals_total() {
        let rows = vec![
            row(5, "Fear", dec!(-12.5)),
            row(2, "Greed", dec!(40.25)),
            row(9, "Extreme Greed", dec!(-3)),
        ];
        let report = MetricsEngine::new().calculate(&rows);
        assert_eq!(report.cumulative_pnl.len(), report.trade_count);
        assert_eq!(
            report.cumulative_pnl.last().map(|p| p.running_total),
            Some(report.total_pnl)
        );
    }

    #[test]
    fn groups_by_sentiment() {
        let rows = vec![
            row(1, "Greed", dec!(10)),
            row(2, "Fear", dec!(-4)),
            row(3, "Greed", dec!(-1)),
            row(4, "Extreme Fear", dec!(7)),
            row(5, "Greed", dec!(3)),
        ];
        let engine = MetricsEngine::new();

        let pnl = engine.pnl_by_sentiment(&rows);
        let labels: Vec<&str> = pnl.iter().map(|g| g.classification.as_str()).collect();
        assert_eq!(labels, vec!["Greed", "Fear", "Extreme Fear"]);
        assert_eq!(pnl[0].values, vec![dec!(10), dec!(-1), dec!(3)]);
        assert_eq!(pnl[0].distribution.median, dec!(3));

        let rates = engine.win_rate_by_sentiment(&rows);
        let labels: Vec<&str> = rates.iter().map(|g| g.classification.as_str()).collect();
        assert_eq!(labels, vec!["Extreme Fear", "Fear", "Greed"]);
        assert_eq!(rates[0].win_rate, Decimal::ONE);
        assert_eq!(rates[1].win_rate, Decimal::ZERO);
        assert_eq!(rates[2].trades, 3);
        assert_eq!(rates[2].win_rate, Decimal::from(2) / Decimal::from(3));
    }
}
