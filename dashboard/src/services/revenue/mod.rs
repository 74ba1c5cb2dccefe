//! # Revenue Fetch Workflow
//!
//! Fetches a revenue report: validates the requested period against today,
//! calls the summary endpoint with retry, then attaches the weekly or monthly
//! breakdown for month and year reports.
//!
//! ## Flow of one fetch
//!
//! ```text
//! attempt n ─┬─ period in the future?        ── yes ─► Validation (no retry)
//!            ├─ token in storage?            ── no ──► Authentication (no retry)
//!            ├─ GET /Orders/revenue          ── 401 ─► Authentication (no retry)
//!            │                               ── err ─► Transient: wait base × n, attempt n+1
//!            └─ day report? ── no ─► GET weekly/monthly breakdown
//!                                      ok   ─► normalize to 4 / 12 buckets
//!                                      err  ─► 4 / 12 zero buckets
//! ```
//!
//! The breakdown is supplementary: its failure never fails the fetch and is
//! never retried.

mod normalize;
mod query;
mod retry;

pub use normalize::{normalize_buckets, zero_buckets};
pub use query::RevenueQuery;
pub use retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};

use std::sync::Arc;

use shared::{FilterType, MonthlyRevenue, RevenueDetails, RevenueResult, WeeklyRevenue};

use crate::core::clock::Clock;
use crate::core::error::{AppError, Result};
use crate::core::service::{ApiService, TokenStore};
use crate::utils::validation::ensure_not_in_future;

/// Message used when no token is stored.
pub const NO_TOKEN: &str = "No session token found. Please sign in again.";

/// Revenue report service.
#[derive(Clone)]
pub struct RevenueService {
    api: Arc<dyn ApiService>,
    tokens: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
}

impl RevenueService {
    pub fn new(
        api: Arc<dyn ApiService>,
        tokens: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            api,
            tokens,
            clock,
            retry,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetch the report for `query`.
    ///
    /// Transient failures of the summary call are retried up to
    /// `max_attempts` times; the last error is returned when all fail.
    #[tracing::instrument(skip_all, fields(query = %query, filter = %query.filter_type()))]
    pub async fn fetch_revenue(&self, query: &RevenueQuery) -> Result<RevenueResult> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.attempt(query).await {
                Ok(result) => {
                    tracing::info!(
                        attempt,
                        revenue = result.total_revenue(),
                        buckets = result.details.as_ref().map(RevenueDetails::len),
                        "Revenue fetched"
                    );
                    return Ok(result);
                }
                Err(err) if !err.is_retryable() => {
                    tracing::warn!(attempt, error = %err, "Revenue fetch failed, not retrying");
                    return Err(err);
                }
                Err(err) if attempt >= max_attempts => {
                    tracing::error!(attempt, error = %err, "Revenue fetch failed, retries exhausted");
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.retry.delay_after(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Revenue fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, query: &RevenueQuery) -> Result<RevenueResult> {
        // Re-read today on every attempt: the day may have changed since dispatch
        ensure_not_in_future(query.reference_date(), query.filter_type(), self.clock.today())?;

        let token = self
            .tokens
            .load()?
            .ok_or_else(|| AppError::Authentication(NO_TOKEN.to_string()))?;

        let summary = self.api.revenue_summary(query, &token).await?;
        let details = self.fetch_details(query, &token).await;

        Ok(RevenueResult { summary, details })
    }

    /// Breakdown for month and year reports; `None` for day reports.
    async fn fetch_details(&self, query: &RevenueQuery, token: &str) -> Option<RevenueDetails> {
        let count = query.filter_type().bucket_count()?;

        match (query.filter_type(), query.month()) {
            (FilterType::Month, Some(month)) => {
                let buckets = match self.api.weekly_revenue(query.year(), month, token).await {
                    Ok(raw) => normalize_buckets(&raw, count),
                    Err(err) => {
                        tracing::warn!(error = %err, "Weekly breakdown unavailable, using zeros");
                        zero_buckets::<WeeklyRevenue>(count)
                    }
                };
                Some(RevenueDetails::Weekly(buckets))
            }
            _ => {
                let buckets = match self.api.monthly_revenue(query.year(), token).await {
                    Ok(raw) => normalize_buckets(&raw, count),
                    Err(err) => {
                        tracing::warn!(error = %err, "Monthly breakdown unavailable, using zeros");
                        zero_buckets::<MonthlyRevenue>(count)
                    }
                };
                Some(RevenueDetails::Monthly(buckets))
            }
        }
    }
}
