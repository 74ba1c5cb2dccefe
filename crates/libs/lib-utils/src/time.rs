//! # Time Utilities
//!
//! Calendar helpers using chrono. Instants travel as epoch milliseconds so
//! state stays plain data; calendar questions are answered in local time.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Get current local time.
pub fn now_local() -> DateTime<Local> {
    Local::now()
}

/// Epoch milliseconds of an instant.
pub fn to_epoch_millis<Tz: TimeZone>(time: &DateTime<Tz>) -> i64 {
    time.timestamp_millis()
}

/// Local calendar date of an epoch-millisecond instant.
pub fn date_from_millis(millis: i64) -> Result<NaiveDate, Error> {
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.with_timezone(&Local).date_naive())
        .ok_or(Error::OutOfRange(millis))
}

/// Epoch milliseconds of local midnight at the start of `date`.
///
/// When midnight does not exist locally (DST gap) the first valid instant of
/// the day is used.
pub fn start_of_day_millis(date: NaiveDate) -> i64 {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(local) => local.timestamp_millis(),
        None => (0..24)
            .filter_map(|h| Local.from_local_datetime(&(midnight + chrono::Duration::hours(h))).earliest())
            .map(|local| local.timestamp_millis())
            .next()
            .unwrap_or_else(|| midnight.and_utc().timestamp_millis()),
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::FailToDateParse(value.to_string()))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    FailToDateParse(String),
    OutOfRange(i64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_midnight_round_trips_to_same_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let millis = start_of_day_millis(date);
        assert_eq!(date_from_millis(millis).unwrap(), date);

        let local = Local.timestamp_millis_opt(millis).single().unwrap();
        assert_eq!(local.hour(), 0);
    }

    #[test]
    fn test_late_evening_stays_on_same_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let evening = start_of_day_millis(date) + 23 * 3_600_000 + 59 * 60_000;
        assert_eq!(date_from_millis(evening).unwrap(), date);
    }

    #[test]
    fn test_parse_and_format_date() {
        let date = parse_date(" 2024-02-29 ").unwrap();
        assert_eq!(format_date(date), "2024-02-29");
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn test_date_from_millis_out_of_range() {
        assert_eq!(date_from_millis(i64::MAX), Err(Error::OutOfRange(i64::MAX)));
    }
}
