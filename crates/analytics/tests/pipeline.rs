use analytics::{Dashboard, MetricsEngine, inner_join};
use chrono::NaiveDate;
use configuration::DataSources;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;

const TRADES_CSV: &str = "\
Account,Coin,Execution Price,Size Tokens,Size USD,Side,Timestamp IST,Start Position,Direction,Closed PnL
0xae5,@107,7.9769,986.87,7872.16,BUY,01-02-2021 22:50,1.0,Buy,100
0xae5,@107,7.98,16.0,127.68,SELL,01-02-2021 23:10,1.0,Sell,-30
0xae5,ETH,1300.5,1.0,1300.5,SELL,02-02-2021 09:00,0.0,Close Long,50
0xae5,ETH,1301.0,1.0,1301.0,BUY,bad timestamp,0.0,Open Long,999
";

const SENTIMENT_CSV: &str = "\
timestamp,value,classification,date
1612137600,40,Fear,2021-02-01
1612310400,60,Greed,2021-02-03
";

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn build(trades: &str, sentiment: &str) -> Dashboard {
    let dir = tempfile::tempdir().unwrap();
    let sources = DataSources {
        trades_path: write(dir.path(), "historical_data.csv", trades),
        sentiment_path: write(dir.path(), "fear_greed_index.csv", sentiment),
    };
    Dashboard::build(&sources)
}

#[test]
fn joins_only_trades_with_a_sentiment_day() {
    let dashboard = build(TRADES_CSV, SENTIMENT_CSV);
    let feb_1 = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();

    assert_eq!(dashboard.joined.len(), 2);
    for row in &dashboard.joined {
        assert_eq!(row.date, feb_1);
        assert_eq!(row.classification, "Fear");
    }

    let report = &dashboard.report;
    assert_eq!(report.total_pnl, dec!(70));
    assert_eq!(report.trade_count, 2);
    assert_eq!(report.win_rate, Some(dec!(0.5)));

    let totals: Vec<Decimal> = report.cumulative_pnl.iter().map(|p| p.running_total).collect();
    assert_eq!(totals, vec![dec!(100), dec!(70)]);

    assert_eq!(dashboard.trades_load.rows_loaded, 4);
    assert_eq!(dashboard.trades_load.unparsed_dates, 1);
    assert!(dashboard.sentiment_load.is_clean());
}

#[test]
fn total_pnl_matches_the_joined_table() {
    let dashboard = build(TRADES_CSV, SENTIMENT_CSV);
    let sum: Decimal = dashboard.joined.iter().map(|r| r.pnl_or_zero()).sum();

    assert_eq!(dashboard.report.total_pnl, sum);
    assert_eq!(
        dashboard.report.cumulative_pnl.last().map(|p| p.running_total),
        Some(sum)
    );
}

#[test]
fn trades_without_side_or_pnl_still_count() {
    let trades = "\
Coin,Side,Timestamp IST,Closed PnL
BTC,BUY,01-02-2021 10:00,100
ETH,,01-02-2021 11:00,-30
SOL,SELL,01-02-2021 12:00,
";
    let dashboard = build(trades, SENTIMENT_CSV);

    assert_eq!(dashboard.joined.len(), 3);
    assert_eq!(dashboard.trades_load.unknown_sides, 1);
    assert_eq!(dashboard.trades_load.missing_pnl, 1);

    let report = &dashboard.report;
    assert_eq!(report.trade_count, 3);
    assert_eq!(report.total_pnl, dec!(70));
    assert_eq!(report.win_rate, Some(Decimal::ONE / dec!(3)));

    let totals: Vec<Decimal> = report.cumulative_pnl.iter().map(|p| p.running_total).collect();
    assert_eq!(totals, vec![dec!(100), dec!(70), dec!(70)]);

    let cards = dashboard.headline();
    assert_eq!(cards.trade_count, 3);
    assert_eq!(cards.win_rate_display, "33.3%");
}

#[test]
fn rebuilding_is_idempotent() {
    let first = build(TRADES_CSV, SENTIMENT_CSV);
    let second = build(TRADES_CSV, SENTIMENT_CSV);

    assert_eq!(first.joined, second.joined);
    assert_eq!(first.report, second.report);
}

#[test]
fn header_only_sentiment_yields_empty_metrics() {
    let dashboard = build(TRADES_CSV, "timestamp,value,classification,date\n");

    assert!(dashboard.joined.is_empty());
    assert_eq!(dashboard.report.total_pnl, Decimal::ZERO);
    assert_eq!(dashboard.report.trade_count, 0);
    assert_eq!(dashboard.report.win_rate, None);
    assert!(dashboard.report.cumulative_pnl.is_empty());
    assert_eq!(dashboard.headline().win_rate_display, "N/A");
}

#[test]
fn malformed_sentiment_source_is_replaced_by_an_empty_table() {
    let dashboard = build(TRADES_CSV, "day,mood\n2021-02-01,Fear\n");

    assert!(dashboard.joined.is_empty());
    let failure = dashboard.sentiment_load.failure.as_deref().unwrap_or_default();
    assert!(failure.contains("date"), "unexpected failure: {failure}");
    assert_eq!(dashboard.trades_load.rows_loaded, 4);
}

#[test]
fn win_rate_stays_within_unit_interval() {
    let dashboard = build(TRADES_CSV, SENTIMENT_CSV);
    let engine = MetricsEngine::new();

    let rate = dashboard.report.win_rate.unwrap();
    assert!(rate >= Decimal::ZERO && rate <= Decimal::ONE);
    for group in engine.win_rate_by_sentiment(&dashboard.joined) {
        assert!(group.win_rate >= Decimal::ZERO && group.win_rate <= Decimal::ONE);
    }
}

#[test]
fn joined_count_equals_matching_trades() {
    let trades = dataset::read_trades(TRADES_CSV.as_bytes(), "trades").unwrap();
    let sentiment = dataset::read_sentiment(SENTIMENT_CSV.as_bytes(), "sentiment").unwrap();

    let days: Vec<NaiveDate> = sentiment.rows.iter().filter_map(|s| s.date.as_date()).collect();
    let matching = trades
        .rows
        .iter()
        .filter(|t| t.date.as_date().is_some_and(|d| days.contains(&d)))
        .count();

    assert_eq!(inner_join(&trades.rows, &sentiment.rows).len(), matching);
}
