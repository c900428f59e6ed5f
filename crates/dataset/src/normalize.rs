use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::CalendarDate;

/// The trade log's `Timestamp IST` layout, e.g. `02-12-2024 22:50`.
pub const TRADE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a trade timestamp with the exact day-month-year hour:minute layout
/// and drops the time of day.
pub fn parse_trade_timestamp(raw: &str) -> CalendarDate {
    match NaiveDateTime::parse_from_str(raw.trim(), TRADE_TIMESTAMP_FORMAT) {
        Ok(timestamp) => CalendarDate::Parsed(timestamp.date()),
        Err(_) => CalendarDate::Unparsed(raw.to_string()),
    }
}

/// Parses a sentiment date, accepting ISO dates, ISO date-times and RFC 3339.
///
/// An explicit offset is not converted; the date is the one written in the
/// string.
pub fn parse_flexible_date(raw: &str) -> CalendarDate {
    let value = raw.trim();

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|timestamp| timestamp.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        });

    match parsed {
        Some(date) => CalendarDate::Parsed(date),
        None => CalendarDate::Unparsed(raw.to_string()),
    }
}
