//! # Navigation Handlers
//!
//! Handlers for screen and tab changes, with the session and role guards.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, FetchStatus, Screen, Tab};
use crate::app::tasks;
use crate::app::AppServices;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle screen change with authentication and role guard
///
/// Entering a screen loads what it shows: the dashboard fetches on first
/// entry, listings refresh on every entry.
///
/// Internal handler function - use [`crate::app::App::handle_screen_change`] instead.
pub(crate) fn handle_screen_change(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    screen: Screen,
) {
    let (screen, mount_dashboard) = {
        let mut state = state.write();

        let target = if state.can_open(screen) {
            screen
        } else if state.is_authenticated() {
            tracing::info!("Access denied: {} not available for this role", screen.title());
            Screen::Home
        } else {
            tracing::info!("Access denied: {} requires authentication, redirecting to Login", screen.title());
            Screen::Login
        };

        match target {
            Screen::ProductDetail(id) => state.products.selected = Some(id),
            Screen::UserDetail(id) => state.users.selected = Some(id),
            _ => {}
        }
        state.current_screen = target;

        let mount = target == Screen::Home && state.dashboard.status == FetchStatus::Idle;
        (target, mount)
    };

    match screen {
        Screen::Home if mount_dashboard => {
            tasks::revenue::dispatch_revenue_fetch(state, services, event_tx);
        }
        Screen::Products => tasks::catalog::fetch_products(state, services, event_tx),
        Screen::Users => tasks::catalog::fetch_users(state, services, event_tx),
        _ => {}
    }
}

/// Handle tab change
///
/// Internal handler function - use [`crate::app::App::handle_tab_change`] instead.
pub(crate) fn handle_tab_change(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    tab: Tab,
) {
    handle_screen_change(state, services, event_tx, tab.screen());
}
