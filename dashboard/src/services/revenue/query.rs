use std::fmt;

use chrono::{Datelike, NaiveDate};
use shared::FilterType;

use crate::core::error::{AppError, Result};

/// Parameters of a revenue report.
///
/// `year` is always present, `month` narrows to a month and `day` narrows to a
/// single day. A day implies a month. The granularity ([`FilterType`]) is
/// derived from which parts are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevenueQuery {
    day: Option<u32>,
    month: Option<u32>,
    year: i32,
}

impl RevenueQuery {
    /// Build a query from raw parts, rejecting impossible combinations.
    pub fn new(day: Option<u32>, month: Option<u32>, year: i32) -> Result<Self> {
        if day.is_some() && month.is_none() {
            return Err(AppError::Validation("A day filter also needs a month".to_string()));
        }
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(AppError::Validation(format!("Invalid month: {}", month)));
            }
        }
        if NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1)).is_none() {
            return Err(AppError::Validation(format!(
                "Invalid date: {}-{}-{}",
                year,
                month.unwrap_or(1),
                day.unwrap_or(1)
            )));
        }

        Ok(Self { day, month, year })
    }

    /// Query for the period of `filter` that contains `date`.
    pub fn for_date(filter: FilterType, date: NaiveDate) -> Self {
        match filter {
            FilterType::Day => Self {
                day: Some(date.day()),
                month: Some(date.month()),
                year: date.year(),
            },
            FilterType::Month => Self {
                day: None,
                month: Some(date.month()),
                year: date.year(),
            },
            FilterType::Year => Self {
                day: None,
                month: None,
                year: date.year(),
            },
        }
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn filter_type(&self) -> FilterType {
        match (self.day, self.month) {
            (Some(_), _) => FilterType::Day,
            (None, Some(_)) => FilterType::Month,
            (None, None) => FilterType::Year,
        }
    }

    /// First day of the queried period. Used for future-date validation.
    pub fn reference_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month.unwrap_or(1), self.day.unwrap_or(1))
            .unwrap_or_default()
    }

    /// Query string pairs in `day`, `month`, `year` order, present parts only.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(day) = self.day {
            pairs.push(("day", day.to_string()));
        }
        if let Some(month) = self.month {
            pairs.push(("month", month.to_string()));
        }
        pairs.push(("year", self.year.to_string()));
        pairs
    }
}

impl fmt::Display for RevenueQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.day, self.month) {
            (Some(d), Some(m)) => write!(f, "{:04}-{:02}-{:02}", self.year, m, d),
            (_, Some(m)) => write!(f, "{:04}-{:02}", self.year, m),
            _ => write!(f, "{:04}", self.year),
        }
    }
}
