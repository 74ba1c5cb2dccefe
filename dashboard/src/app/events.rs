//! # Application Events
//!
//! Results of background tasks, sent to the owner of the [`App`](crate::app::App)
//! over the event channel.

use shared::{LoginPayload, Product, RevenueResult, User};

use crate::core::error::Result;

/// Async task results sent back to the state owner
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Login completed
    LoginResult(Result<LoginPayload>),
    /// Revenue fetch completed; `seq` identifies the dispatch
    RevenueLoaded {
        seq: u64,
        result: Result<RevenueResult>,
    },
    /// Product list received
    ProductsLoaded(Result<Vec<Product>>),
    /// User list received
    UsersLoaded(Result<Vec<User>>),
    /// Create-user request completed
    UserCreated(Result<()>),
    /// Change-password request completed
    PasswordChanged(Result<()>),
}

impl AppEvent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::LoginResult(_) => "LoginResult",
            AppEvent::RevenueLoaded { .. } => "RevenueLoaded",
            AppEvent::ProductsLoaded(_) => "ProductsLoaded",
            AppEvent::UsersLoaded(_) => "UsersLoaded",
            AppEvent::UserCreated(_) => "UserCreated",
            AppEvent::PasswordChanged(_) => "PasswordChanged",
        }
    }
}
