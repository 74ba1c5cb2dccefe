//! # Session Service
//!
//! Login, logout and startup restore of the persisted session token.
//!
//! Restoring at startup is optimistic: a stored token marks the session
//! authenticated without asking the server. A stale token is caught on the
//! first `401`, which forces a logout through [`SessionService::logout`].

use std::sync::Arc;

use shared::LoginPayload;

use crate::core::error::Result;
use crate::core::service::{ApiService, TokenStore};

/// Session restored from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub is_authenticated: bool,
}

/// Session workflow over an [`ApiService`] and a [`TokenStore`].
#[derive(Clone)]
pub struct SessionService {
    api: Arc<dyn ApiService>,
    tokens: Arc<dyn TokenStore>,
}

impl SessionService {
    pub fn new(api: Arc<dyn ApiService>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// Authenticate and persist the returned token.
    ///
    /// Storage is only written on success; a failed login leaves any
    /// previously stored token in place.
    pub async fn login(&self, username: String, password: String) -> Result<LoginPayload> {
        let payload = self.api.login(username, password).await?;
        self.tokens.save(&payload.token)?;
        tracing::info!(has_profile = payload.user.is_some(), "Session token stored");
        Ok(payload)
    }

    /// Remove the stored token. Idempotent.
    pub fn logout(&self) -> Result<()> {
        self.tokens.remove()?;
        tracing::info!("Session token removed");
        Ok(())
    }

    /// Read the stored token once at startup.
    pub fn check_auth_state(&self) -> Result<SessionSnapshot> {
        let token = self.tokens.load()?.filter(|t| !t.trim().is_empty());
        let is_authenticated = token.is_some();
        tracing::debug!(is_authenticated, "Session restored from storage");
        Ok(SessionSnapshot {
            token,
            is_authenticated,
        })
    }
}
