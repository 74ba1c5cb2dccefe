//! # Revenue Tasks
//!
//! Dispatch of revenue fetches for the dashboard.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, FetchStatus};
use crate::app::AppServices;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::spawn;

/// Start a revenue fetch for the current filter and date.
///
/// Moves the dashboard to `Loading` and bumps `latest_seq`; the spawned task
/// reports back with that sequence number so older fetches still in flight
/// can be recognised and dropped. Returns the sequence number.
pub(crate) fn dispatch_revenue_fetch(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
) -> u64 {
    // Lock held only while bumping the sequence and reading the query
    let (seq, query) = {
        let mut state = state.write();
        let dashboard = &mut state.dashboard;
        dashboard.latest_seq += 1;
        let seq = dashboard.latest_seq;

        match dashboard.query() {
            Ok(query) => {
                let previous = std::mem::replace(&mut dashboard.status, FetchStatus::Loading);
                if previous != FetchStatus::Loading {
                    dashboard.prior_status = previous;
                }
                (seq, query)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Selected date cannot be turned into a query");
                dashboard.status = FetchStatus::Errored(e.user_message().to_string());
                return seq;
            }
        }
    };

    tracing::debug!(seq, query = %query, "Dispatching revenue fetch");

    let revenue = services.revenue.clone();
    spawn(async move {
        let result = revenue.fetch_revenue(&query).await;
        let _ = event_tx.send(AppEvent::RevenueLoaded { seq, result }).await;
    });

    seq
}
