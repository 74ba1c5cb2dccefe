//! # Dashboard Handlers
//!
//! Filter and date selection for the revenue dashboard.
//!
//! A new filter or date is validated against today before it is applied. A
//! failing check raises the blocking alert and leaves filter, date and fetch
//! status untouched.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, FetchStatus};
use crate::app::tasks;
use crate::app::AppServices;
use crate::utils::validation::ensure_instant_not_in_future;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::FilterType;
use std::sync::Arc;

/// Handle a filter type picked in the filter modal.
///
/// The selected instant carries over to the new granularity and is
/// re-validated there.
///
/// Internal handler function - use [`crate::app::App::handle_filter_change`] instead.
pub(crate) fn handle_filter_change(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    filter: FilterType,
) {
    let today = services.clock.today();
    {
        let mut state = state.write();
        let dashboard = &mut state.dashboard;
        dashboard.filter_modal_visible = false;
        dashboard.picker_visible = false;

        if let Err(e) = ensure_instant_not_in_future(dashboard.selected_date_ms, filter, today) {
            tracing::info!(filter = %filter, error = %e, "Filter change rejected");
            dashboard.alert = Some(e.user_message().to_string());
            return;
        }

        dashboard.filter_type = filter;
    }

    tasks::revenue::dispatch_revenue_fetch(state, services, event_tx);
}

/// Handle a date confirmed in the picker.
///
/// Internal handler function - use [`crate::app::App::handle_date_confirm`] instead.
pub(crate) fn handle_date_confirm(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    selected_date_ms: i64,
) {
    let today = services.clock.today();
    {
        let mut state = state.write();
        let dashboard = &mut state.dashboard;
        dashboard.picker_visible = false;

        if let Err(e) = ensure_instant_not_in_future(selected_date_ms, dashboard.filter_type, today) {
            tracing::info!(error = %e, "Date rejected");
            dashboard.alert = Some(e.user_message().to_string());
            return;
        }

        dashboard.selected_date_ms = selected_date_ms;
    }

    tasks::revenue::dispatch_revenue_fetch(state, services, event_tx);
}

/// Apply a filter and a date together, dispatching a single fetch.
///
/// Internal handler function - use [`crate::app::App::handle_report_select`] instead.
pub(crate) fn handle_report_select(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    filter: FilterType,
    selected_date_ms: i64,
) {
    let today = services.clock.today();
    {
        let mut state = state.write();
        let dashboard = &mut state.dashboard;
        dashboard.filter_modal_visible = false;
        dashboard.picker_visible = false;

        if let Err(e) = ensure_instant_not_in_future(selected_date_ms, filter, today) {
            tracing::info!(filter = %filter, error = %e, "Report selection rejected");
            dashboard.alert = Some(e.user_message().to_string());
            return;
        }

        dashboard.filter_type = filter;
        dashboard.selected_date_ms = selected_date_ms;
    }

    tasks::revenue::dispatch_revenue_fetch(state, services, event_tx);
}

/// Re-run the fetch for the current filter and date (retry button, refresh).
///
/// Internal handler function - use [`crate::app::App::handle_refresh`] instead.
pub(crate) fn handle_refresh(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
) -> u64 {
    tasks::revenue::dispatch_revenue_fetch(state, services, event_tx)
}

pub(crate) fn set_picker_visible(state: Arc<RwLock<AppState>>, visible: bool) {
    state.write().dashboard.picker_visible = visible;
}

pub(crate) fn set_filter_modal_visible(state: Arc<RwLock<AppState>>, visible: bool) {
    state.write().dashboard.filter_modal_visible = visible;
}

pub(crate) fn dismiss_alert(state: Arc<RwLock<AppState>>) {
    state.write().dashboard.alert = None;
}

/// Drop an error result, back to `Idle`.
pub(crate) fn clear_error(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    if matches!(state.dashboard.status, FetchStatus::Errored(_)) {
        state.dashboard.status = FetchStatus::Idle;
    }
}
