//! Validation of report dates against "today".
//!
//! Comparisons happen on calendar dates (midnight-normalized), so any instant
//! of the current day is never in the future. Callers must pass the date of
//! the moment of dispatch; nothing here caches "today".

use chrono::{Datelike, NaiveDate};
use shared::FilterType;

use crate::core::error::{AppError, Result};

/// Whether `date` denotes a day/month/year strictly after the one containing
/// `today`, at the granularity of `filter`.
pub fn is_date_in_future(date: NaiveDate, filter: FilterType, today: NaiveDate) -> bool {
    match filter {
        FilterType::Year => date.year() > today.year(),
        FilterType::Month => (date.year(), date.month()) > (today.year(), today.month()),
        FilterType::Day => date > today,
    }
}

/// `Err(Validation)` with a user-facing message when `date` is in the future.
pub fn ensure_not_in_future(date: NaiveDate, filter: FilterType, today: NaiveDate) -> Result<()> {
    if !is_date_in_future(date, filter, today) {
        return Ok(());
    }

    let message = match filter {
        FilterType::Day => "Cannot select a date in the future",
        FilterType::Month => "Cannot select a month in the future",
        FilterType::Year => "Cannot select a year in the future",
    };
    Err(AppError::Validation(message.to_string()))
}

/// [`ensure_not_in_future`] for an epoch-millisecond instant, read in local
/// time.
pub fn ensure_instant_not_in_future(millis: i64, filter: FilterType, today: NaiveDate) -> Result<()> {
    let date = lib_utils::date_from_millis(millis)?;
    ensure_not_in_future(date, filter, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_granularity() {
        let today = date(2024, 6, 15);
        assert!(is_date_in_future(date(2025, 1, 1), FilterType::Year, today));
        assert!(is_date_in_future(date(2030, 12, 31), FilterType::Year, today));
        // Later in the current year is still the current year
        assert!(!is_date_in_future(date(2024, 12, 31), FilterType::Year, today));
        assert!(!is_date_in_future(date(2023, 12, 31), FilterType::Year, today));
    }

    #[test]
    fn test_month_granularity() {
        let today = date(2024, 6, 15);
        assert!(!is_date_in_future(date(2024, 6, 30), FilterType::Month, today));
        assert!(is_date_in_future(date(2024, 7, 1), FilterType::Month, today));
        assert!(!is_date_in_future(date(2023, 12, 1), FilterType::Month, today));
        assert!(is_date_in_future(date(2025, 1, 1), FilterType::Month, today));
    }

    #[test]
    fn test_day_granularity() {
        let today = date(2024, 6, 15);
        assert!(!is_date_in_future(today, FilterType::Day, today));
        assert!(is_date_in_future(today + Duration::days(1), FilterType::Day, today));
        assert!(!is_date_in_future(today - Duration::days(1), FilterType::Day, today));
    }

    #[test]
    fn test_instant_later_today_is_not_future() {
        let today = date(2024, 6, 15);
        let late_evening = lib_utils::start_of_day_millis(today) + 22 * 3_600_000;
        assert!(ensure_instant_not_in_future(late_evening, FilterType::Day, today).is_ok());

        let tomorrow = lib_utils::start_of_day_millis(today + Duration::days(1)) + 60_000;
        assert!(ensure_instant_not_in_future(tomorrow, FilterType::Day, today).is_err());
    }

    #[test]
    fn test_ensure_not_in_future_messages() {
        let today = date(2024, 6, 15);
        assert!(ensure_not_in_future(today, FilterType::Day, today).is_ok());
        assert_eq!(
            ensure_not_in_future(date(2025, 1, 1), FilterType::Year, today),
            Err(AppError::Validation("Cannot select a year in the future".to_string()))
        );
    }
}
