//! # Event Handler
//!
//! Applies results of background tasks to the application state.
//!
//! Any authentication failure tears the session down and routes to the login
//! screen. Revenue results are applied only when they belong to the latest
//! dispatched fetch.

use crate::app::handlers;
use crate::app::state::{FetchStatus, Screen};
use crate::app::{App, AppEvent};
use crate::core::error::{AppError, Result};
use shared::{LoginPayload, Product, RevenueResult, User};

/// Message shown after a user is created
pub const USER_CREATED: &str = "User created";

/// Message shown after a password change
pub const PASSWORD_CHANGED: &str = "Password changed";

impl App {
    /// Handle async event results
    ///
    /// Acquires the write lock per event, for the duration of the update only.
    pub fn handle_event(&mut self, event: AppEvent) {
        tracing::debug!(event = event.name(), "Handling event");

        match event {
            AppEvent::LoginResult(result) => self.handle_login_result(result),
            AppEvent::RevenueLoaded { seq, result } => self.handle_revenue_loaded(seq, result),
            AppEvent::ProductsLoaded(result) => self.handle_products_loaded(result),
            AppEvent::UsersLoaded(result) => self.handle_users_loaded(result),
            AppEvent::UserCreated(result) => self.handle_user_created(result),
            AppEvent::PasswordChanged(result) => self.handle_password_changed(result),
        }
    }

    fn force_logout(&self, error: &AppError) {
        tracing::warn!(error = %error, "Authentication failed, signing out");
        handlers::auth::handle_logout(self.state.clone(), &self.services);
    }

    fn handle_login_result(&mut self, result: Result<LoginPayload>) {
        tracing::info!(event = "LoginResult", success = result.is_ok(), "Processing login result");

        match result {
            Ok(payload) => {
                {
                    let mut state = self.state.write();
                    state.session.sign_in(payload.token, payload.user);
                }
                self.handle_screen_change(Screen::Home);
            }
            Err(e) => {
                let mut state = self.state.write();
                state.session.loading = false;
                state.session.error = Some(e.user_message().to_string());
            }
        }
    }

    fn handle_revenue_loaded(&mut self, seq: u64, result: Result<RevenueResult>) {
        let latest = self.state.read().dashboard.latest_seq;
        if seq != latest {
            tracing::debug!(seq, latest, "Dropping stale revenue result");
            return;
        }

        match result {
            Ok(result) => {
                let mut state = self.state.write();
                state.dashboard.status = FetchStatus::Loaded(result);
                state.dashboard.last_updated = Some(lib_utils::now_local());
            }
            Err(e) if e.requires_logout() => self.force_logout(&e),
            Err(e @ AppError::Validation(_)) => {
                // Rejected before any request: raise the alert, keep the old status
                let mut state = self.state.write();
                let dashboard = &mut state.dashboard;
                dashboard.alert = Some(e.user_message().to_string());
                dashboard.status = std::mem::take(&mut dashboard.prior_status);
            }
            Err(e) => {
                let mut state = self.state.write();
                state.dashboard.status = FetchStatus::Errored(e.user_message().to_string());
            }
        }
    }

    fn handle_products_loaded(&mut self, result: Result<Vec<Product>>) {
        let mut state = self.state.write();
        state.products.loading = false;
        match result {
            Ok(items) => {
                state.products.items = items;
                state.products.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load products");
                state.products.error = Some(e.user_message().to_string());
            }
        }
    }

    fn handle_users_loaded(&mut self, result: Result<Vec<User>>) {
        let mut state = self.state.write();
        state.users.loading = false;
        match result {
            Ok(items) => {
                state.users.items = items;
                state.users.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users");
                state.users.error = Some(e.user_message().to_string());
            }
        }
    }

    fn handle_user_created(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                {
                    let mut state = self.state.write();
                    state.create_user.submitting = false;
                    state.create_user.message = Some(USER_CREATED.to_string());
                }
                self.load_users();
            }
            Err(e) if e.requires_logout() => self.force_logout(&e),
            Err(e) => {
                let mut state = self.state.write();
                state.create_user.submitting = false;
                state.create_user.error = Some(e.user_message().to_string());
            }
        }
    }

    fn handle_password_changed(&mut self, result: Result<()>) {
        let mut state = self.state.write();
        state.change_password.submitting = false;
        match result {
            Ok(()) => state.change_password.message = Some(PASSWORD_CHANGED.to_string()),
            Err(e) => state.change_password.error = Some(e.user_message().to_string()),
        }
    }
}
