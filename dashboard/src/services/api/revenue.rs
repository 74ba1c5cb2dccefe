//! # Revenue Endpoints
//!
//! Summary and breakdown reports. All require a bearer token.

use shared::{MonthlyRevenue, RevenueSummary, WeeklyRevenue};

use super::client::ApiClient;
use crate::core::error::Result;
use crate::services::revenue::RevenueQuery;

/// `GET /Orders/revenue?day=&month=&year=`, parameters only as present.
#[tracing::instrument(skip_all, fields(query = %query))]
pub async fn get_summary(client: &ApiClient, query: &RevenueQuery, token: &str) -> Result<RevenueSummary> {
    let start = std::time::Instant::now();
    let request = client
        .get("Orders/revenue", Some(token))
        .query(&query.query_pairs());

    let summary: RevenueSummary = client.get_json(request).await?;
    tracing::debug!(
        revenue = summary.revenue,
        duration_ms = start.elapsed().as_millis(),
        "Revenue summary received"
    );
    Ok(summary)
}

/// `GET /Orders/revenue/weekly?year=&month=`
#[tracing::instrument(skip(client, token))]
pub async fn get_weekly(client: &ApiClient, year: i32, month: u32, token: &str) -> Result<Vec<WeeklyRevenue>> {
    let request = client
        .get("Orders/revenue/weekly", Some(token))
        .query(&[("year", year.to_string()), ("month", month.to_string())]);

    let buckets: Vec<WeeklyRevenue> = client.get_json(request).await?;
    tracing::debug!(count = buckets.len(), "Weekly breakdown received");
    Ok(buckets)
}

/// `GET /Orders/revenue/monthly?year=`
#[tracing::instrument(skip(client, token))]
pub async fn get_monthly(client: &ApiClient, year: i32, token: &str) -> Result<Vec<MonthlyRevenue>> {
    let request = client
        .get("Orders/revenue/monthly", Some(token))
        .query(&[("year", year.to_string())]);

    let buckets: Vec<MonthlyRevenue> = client.get_json(request).await?;
    tracing::debug!(count = buckets.len(), "Monthly breakdown received");
    Ok(buckets)
}
