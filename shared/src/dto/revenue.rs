//! # Revenue DTOs
//!
//! Summary and breakdown payloads of the `/Orders/revenue` family of endpoints.
//!
//! ## Fixed-length breakdowns
//!
//! A month report always carries [`WEEKS_PER_MONTH`] weekly buckets and a year
//! report always carries [`MONTHS_PER_YEAR`] monthly buckets, ordered by period.
//! The server may send fewer; the client fills the gaps with zero revenue.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Number of weekly buckets in a month breakdown.
pub const WEEKS_PER_MONTH: u32 = 4;

/// Number of monthly buckets in a year breakdown.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Granularity of a revenue report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Day,
    Month,
    Year,
}

impl FilterType {
    pub fn all() -> &'static [FilterType] {
        &[FilterType::Day, FilterType::Month, FilterType::Year]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Day => "day",
            FilterType::Month => "month",
            FilterType::Year => "year",
        }
    }

    /// Number of breakdown buckets for this granularity. `None` for day reports,
    /// which have no breakdown.
    pub fn bucket_count(&self) -> Option<u32> {
        match self {
            FilterType::Day => None,
            FilterType::Month => Some(WEEKS_PER_MONTH),
            FilterType::Year => Some(MONTHS_PER_YEAR),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(FilterType::Day),
            "month" => Ok(FilterType::Month),
            "year" => Ok(FilterType::Year),
            other => Err(format!("unknown filter type '{}', expected day, month or year", other)),
        }
    }
}

/// Summary payload of `GET /Orders/revenue`.
///
/// `revenue` defaults to `0` and is also accepted as `totalRevenue`. Any other
/// field the server sends is kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, alias = "totalRevenue")]
    pub revenue: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RevenueSummary {
    pub fn new(revenue: f64) -> Self {
        Self {
            revenue,
            ..Default::default()
        }
    }
}

/// A period bucket of a revenue breakdown.
pub trait Bucket: Clone {
    /// 1-based period key (week of month, or month of year).
    fn period(&self) -> u32;
    fn revenue(&self) -> f64;
    /// Bucket for `period` with zero revenue.
    fn empty(period: u32) -> Self;
}

/// One week of a month breakdown (`GET /Orders/revenue/weekly`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRevenue {
    pub week_of_month: u32,
    #[serde(default)]
    pub revenue: f64,
}

impl Bucket for WeeklyRevenue {
    fn period(&self) -> u32 {
        self.week_of_month
    }

    fn revenue(&self) -> f64 {
        self.revenue
    }

    fn empty(period: u32) -> Self {
        Self {
            week_of_month: period,
            revenue: 0.0,
        }
    }
}

/// One month of a year breakdown (`GET /Orders/revenue/monthly`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: u32,
    #[serde(default)]
    pub revenue: f64,
}

impl Bucket for MonthlyRevenue {
    fn period(&self) -> u32 {
        self.month
    }

    fn revenue(&self) -> f64 {
        self.revenue
    }

    fn empty(period: u32) -> Self {
        Self {
            month: period,
            revenue: 0.0,
        }
    }
}

/// Breakdown attached to month and year reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RevenueDetails {
    Weekly(Vec<WeeklyRevenue>),
    Monthly(Vec<MonthlyRevenue>),
}

impl RevenueDetails {
    pub fn len(&self) -> usize {
        match self {
            RevenueDetails::Weekly(b) => b.len(),
            RevenueDetails::Monthly(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Revenue per bucket, in period order.
    pub fn values(&self) -> Vec<f64> {
        match self {
            RevenueDetails::Weekly(b) => b.iter().map(Bucket::revenue).collect(),
            RevenueDetails::Monthly(b) => b.iter().map(Bucket::revenue).collect(),
        }
    }

    /// Chart axis labels, in period order.
    pub fn labels(&self) -> Vec<String> {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        match self {
            RevenueDetails::Weekly(b) => b.iter().map(|w| format!("Week {}", w.week_of_month)).collect(),
            RevenueDetails::Monthly(b) => b
                .iter()
                .map(|m| {
                    MONTHS
                        .get((m.month as usize).wrapping_sub(1))
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| m.month.to_string())
                })
                .collect(),
        }
    }
}

/// Result of a revenue fetch: the summary fields plus an optional breakdown.
///
/// `details` is `None` for day reports, 4 weekly buckets for month reports and
/// 12 monthly buckets for year reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueResult {
    #[serde(flatten)]
    pub summary: RevenueSummary,
    pub details: Option<RevenueDetails>,
}

impl RevenueResult {
    pub fn total_revenue(&self) -> f64 {
        self.summary.revenue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_parse_and_display() {
        assert_eq!("Month".parse::<FilterType>().unwrap(), FilterType::Month);
        assert_eq!(FilterType::Year.to_string(), "year");
        assert!("week".parse::<FilterType>().is_err());
    }

    #[test]
    fn test_bucket_counts() {
        assert_eq!(FilterType::Day.bucket_count(), None);
        assert_eq!(FilterType::Month.bucket_count(), Some(4));
        assert_eq!(FilterType::Year.bucket_count(), Some(12));
    }

    #[test]
    fn test_summary_keeps_unknown_fields() {
        let summary: RevenueSummary =
            serde_json::from_str(r#"{"id":5,"revenue":1200.5,"orderCount":3}"#).unwrap();
        assert_eq!(summary.id, Some(5));
        assert_eq!(summary.revenue, 1200.5);
        assert_eq!(summary.extra["orderCount"], 3);

        let alias: RevenueSummary = serde_json::from_str(r#"{"totalRevenue":42}"#).unwrap();
        assert_eq!(alias.revenue, 42.0);

        let empty: RevenueSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.revenue, 0.0);
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = RevenueResult {
            summary: RevenueSummary::new(90000.0),
            details: Some(RevenueDetails::Weekly(vec![WeeklyRevenue::empty(1)])),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["revenue"], 90000.0);
        assert_eq!(json["details"][0]["weekOfMonth"], 1);
        assert_eq!(json["details"][0]["revenue"], 0.0);
    }

    #[test]
    fn test_day_result_serializes_null_details() {
        let result = RevenueResult {
            summary: RevenueSummary::new(10.0),
            details: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["details"].is_null());
    }

    #[test]
    fn test_detail_labels() {
        let monthly = RevenueDetails::Monthly((1..=12).map(MonthlyRevenue::empty).collect());
        let labels = monthly.labels();
        assert_eq!(labels.first().map(String::as_str), Some("Jan"));
        assert_eq!(labels.last().map(String::as_str), Some("Dec"));

        let weekly = RevenueDetails::Weekly(vec![WeeklyRevenue { week_of_month: 2, revenue: 5.0 }]);
        assert_eq!(weekly.labels(), vec!["Week 2".to_string()]);
        assert_eq!(weekly.values(), vec![5.0]);
    }
}
