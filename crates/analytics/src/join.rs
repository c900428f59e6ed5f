use chrono::NaiveDate;
use core_types::{JoinedRecord, SentimentRecord, TradeRecord};
use std::collections::HashMap;

/// Inner-joins trades to the sentiment index on calendar date.
///
/// The output keeps trade order and holds exactly one row per trade whose
/// date is present in `sentiment`. Trades with an unmatched or unparsed date
/// are left out. If the index lists a date more than once, the first row for
/// that date is used.
pub fn inner_join(trades: &[TradeRecord], sentiment: &[SentimentRecord]) -> Vec<JoinedRecord> {
    let mut by_date: HashMap<NaiveDate, &str> = HashMap::with_capacity(sentiment.len());
    for day in sentiment {
        if let Some(date) = day.date.as_date() {
            by_date.entry(date).or_insert(day.classification.as_str());
        }
    }

    let joined: Vec<JoinedRecord> = trades
        .iter()
        .filter_map(|trade| {
            let date = trade.date.as_date()?;
            let classification = by_date.get(&date)?;
            Some(JoinedRecord::new(trade, date, classification))
        })
        .collect();

    tracing::debug!(
        trades = trades.len(),
        sentiment_days = by_date.len(),
        joined = joined.len(),
        dropped = trades.len() - joined.len(),
        "Joined trades to sentiment."
    );

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CalendarDate, Side};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 2, d).unwrap()
    }

    fn trade(date: CalendarDate, pnl: Decimal) -> TradeRecord {
        TradeRecord {
            timestamp: String::new(),
            side: Some(Side::Sell),
            coin: "ETH".into(),
            closed_pnl: Some(pnl),
            date,
        }
    }

    fn sentiment(date: CalendarDate, label: &str) -> SentimentRecord {
        SentimentRecord {
            date_raw: String::new(),
            classification: label.into(),
            date,
        }
    }

    #[test]
    fn keeps_only_trades_with_a_sentiment_day() {
        let trades = vec![
            trade(day(1).into(), dec!(100)),
            trade(day(1).into(), dec!(-30)),
            trade(day(2).into(), dec!(50)),
        ];
        let index = vec![
            sentiment(day(1).into(), "Fear"),
            sentiment(day(3).into(), "Greed"),
        ];

        let joined = inner_join(&trades, &index);
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|r| r.date == day(1) && r.classification == "Fear"));
        assert_eq!(joined[0].closed_pnl, Some(dec!(100)));
        assert_eq!(joined[1].closed_pnl, Some(dec!(-30)));
        assert!(joined[0].win);
        assert!(!joined[1].win);
    }

    #[test]
    fn unparsed_dates_never_match() {
        let raw = CalendarDate::Unparsed("bad".into());
        let trades = vec![trade(raw.clone(), dec!(1))];
        let index = vec![sentiment(raw, "Fear")];
        assert!(inner_join(&trades, &index).is_empty());
    }

    #[test]
    fn duplicate_sentiment_days_do_not_fan_out() {
        let trades = vec![trade(day(1).into(), dec!(5))];
        let index = vec![
            sentiment(day(1).into(), "Fear"),
            sentiment(day(1).into(), "Greed"),
        ];
        let joined = inner_join(&trades, &index);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].classification, "Fear");
    }

    #[test]
    fn empty_sentiment_yields_empty_join() {
        let trades = vec![trade(day(1).into(), dec!(5))];
        assert!(inner_join(&trades, &[]).is_empty());
    }
}
