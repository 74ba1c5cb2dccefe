//! Reconciliation of sparse breakdowns against the fixed period range.

use shared::Bucket;

/// Full `1..=count` sequence of buckets, ascending by period.
///
/// Each expected period takes the revenue of the first matching bucket in
/// `raw`, or zero when the server sent none. Buckets outside the range are
/// dropped. The output length is always `count`.
pub fn normalize_buckets<B: Bucket>(raw: &[B], count: u32) -> Vec<B> {
    (1..=count)
        .map(|period| {
            raw.iter()
                .find(|b| b.period() == period)
                .cloned()
                .unwrap_or_else(|| B::empty(period))
        })
        .collect()
}

/// `1..=count` buckets with zero revenue.
pub fn zero_buckets<B: Bucket>(count: u32) -> Vec<B> {
    (1..=count).map(B::empty).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{MonthlyRevenue, WeeklyRevenue, MONTHS_PER_YEAR, WEEKS_PER_MONTH};

    fn week(n: u32, revenue: f64) -> WeeklyRevenue {
        WeeklyRevenue { week_of_month: n, revenue }
    }

    #[test]
    fn test_missing_week_is_zero_filled() {
        let raw = vec![week(1, 10.0), week(2, 20.0), week(4, 40.0)];
        let out = normalize_buckets(&raw, WEEKS_PER_MONTH);

        assert_eq!(out, vec![week(1, 10.0), week(2, 20.0), week(3, 0.0), week(4, 40.0)]);
    }

    #[test]
    fn test_unordered_and_out_of_range_input() {
        let raw = vec![week(5, 99.0), week(3, 30.0), week(1, 10.0), week(0, 1.0)];
        let out = normalize_buckets(&raw, WEEKS_PER_MONTH);

        assert_eq!(out.len(), 4);
        assert_eq!(out.iter().map(|w| w.week_of_month).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(out.iter().map(|w| w.revenue).collect::<Vec<_>>(), vec![10.0, 0.0, 30.0, 0.0]);
    }

    #[test]
    fn test_duplicate_period_takes_first() {
        let raw = vec![week(2, 5.0), week(2, 7.0)];
        let out = normalize_buckets(&raw, WEEKS_PER_MONTH);
        assert_eq!(out[1].revenue, 5.0);
    }

    #[test]
    fn test_monthly_empty_input() {
        let out: Vec<MonthlyRevenue> = normalize_buckets(&[], MONTHS_PER_YEAR);
        assert_eq!(out.len(), 12);
        assert!(out.iter().all(|m| m.revenue == 0.0));
        assert_eq!(out[11].month, 12);
        assert_eq!(out, zero_buckets::<MonthlyRevenue>(MONTHS_PER_YEAR));
    }
}
