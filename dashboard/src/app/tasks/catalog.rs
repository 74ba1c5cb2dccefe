//! # Catalog Tasks
//!
//! Async tasks for the product and user listings and the account forms.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::AppServices;
use crate::core::error::AppError;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::{ChangePasswordRequest, CreateUserRequest};
use std::sync::Arc;
use tokio::spawn;

/// Fetch the product list.
///
/// Skipped while a fetch is already running.
pub(crate) fn fetch_products(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.products.loading {
            return;
        }
        state.products.loading = true;
        state.products.error = None;
    }

    let api = services.api.clone();
    spawn(async move {
        let result = api.list_products().await;
        if let Ok(products) = &result {
            tracing::info!(count = products.len(), "Products fetched");
        }
        let _ = event_tx.send(AppEvent::ProductsLoaded(result)).await;
    });
}

/// Fetch the user list.
///
/// Skipped while a fetch is already running.
pub(crate) fn fetch_users(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.users.loading {
            return;
        }
        state.users.loading = true;
        state.users.error = None;
    }

    let api = services.api.clone();
    spawn(async move {
        let result = api.list_users().await;
        if let Ok(users) = &result {
            tracing::info!(count = users.len(), "Users fetched");
        }
        let _ = event_tx.send(AppEvent::UsersLoaded(result)).await;
    });
}

/// Submit a new user with the session token.
pub(crate) fn submit_create_user(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    request: CreateUserRequest,
) {
    let token = {
        let mut state = state.write();
        state.create_user.start();
        state.session.token().map(str::to_string)
    };

    let api = services.api.clone();
    spawn(async move {
        let result = match token {
            Some(token) => api.create_user(request, &token).await,
            None => Err(AppError::Authentication(
                crate::services::revenue::NO_TOKEN.to_string(),
            )),
        };
        let _ = event_tx.send(AppEvent::UserCreated(result)).await;
    });
}

/// Submit a password change.
pub(crate) fn submit_change_password(
    state: Arc<RwLock<AppState>>,
    services: &AppServices,
    event_tx: Sender<AppEvent>,
    request: ChangePasswordRequest,
) {
    state.write().change_password.start();

    let api = services.api.clone();
    spawn(async move {
        let result = api.change_password(request).await;
        let _ = event_tx.send(AppEvent::PasswordChanged(result)).await;
    });
}
