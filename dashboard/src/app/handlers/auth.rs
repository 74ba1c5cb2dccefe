//! # Authentication Handlers
//!
//! Handlers for login and logout.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::AppServices;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle login button click
///
/// Internal handler function - use [`crate::app::App::handle_login_click`] instead.
pub(crate) fn handle_login_click(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    username: String,
    password: String,
) {
    if username.trim().is_empty() || password.is_empty() {
        state.write().session.error = Some("Username and password required".to_string());
        return;
    }

    {
        let mut state = state.write();
        state.session.loading = true;
        state.session.error = None;
    }

    let session = services.session.clone();
    tokio::spawn(async move {
        let result = session.login(username, password).await;
        let _ = event_tx.send(AppEvent::LoginResult(result)).await;
    });
}

/// Tear the session down: clear storage, reset state, show the login screen.
///
/// Used for the logout action and for every authentication failure.
/// Idempotent.
///
/// Internal handler function - use [`crate::app::App::handle_logout`] instead.
pub(crate) fn handle_logout(state: Arc<RwLock<AppState>>, services: &AppServices) {
    if let Err(e) = services.session.logout() {
        // State is reset regardless; a leftover token is dropped on the next 401
        tracing::error!(error = %e, "Failed to remove stored token");
    }

    let today = lib_utils::start_of_day_millis(services.clock.today());
    state.write().reset_session(today);
    tracing::info!("Signed out");
}
