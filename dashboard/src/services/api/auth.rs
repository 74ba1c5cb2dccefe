//! # Authentication Endpoints
//!
//! Login and password change. Neither carries a bearer token.

use shared::{ChangePasswordRequest, LoginPayload, LoginRequest};

use super::client::{server_message, ApiClient};
use crate::core::error::{AppError, Result};

/// Fallback shown when a failed login carries no usable message.
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Fallback shown when a failed password change carries no usable message.
pub const CHANGE_PASSWORD_FAILED: &str = "Could not change the password. Please try again.";

/// Login with username and password.
///
/// Any refusal is reported as [`AppError::Api`] with the server's message.
#[tracing::instrument(skip_all, fields(username = %username))]
pub async fn login(client: &ApiClient, username: String, password: String) -> Result<LoginPayload> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest { username, password };

    let response = ApiClient::send(client.client.post(client.url("users/login")).json(&request)).await?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::Transient(format!("Failed to read response: {}", e)))?;
    let duration = start.elapsed();

    if status.is_success() {
        match LoginPayload::from_body(&body) {
            Some(payload) => {
                tracing::info!(duration_ms = duration.as_millis(), "Login successful");
                Ok(payload)
            }
            None => {
                tracing::error!("Login response did not contain a token");
                Err(AppError::Api("Login response did not contain a token".to_string()))
            }
        }
    } else {
        let message = server_message(&body).unwrap_or_else(|| LOGIN_FAILED.to_string());
        tracing::warn!(
            status = status.as_u16(),
            error = %message,
            duration_ms = duration.as_millis(),
            "Login failed"
        );
        Err(AppError::Api(message))
    }
}

/// Change a user's password.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn change_password(client: &ApiClient, request: ChangePasswordRequest) -> Result<()> {
    let response = ApiClient::send(
        client
            .client
            .post(client.url("users/change-password"))
            .json(&request),
    )
    .await?;

    let status = response.status();
    if status.is_success() {
        tracing::info!("Password changed");
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    let message = server_message(&body).unwrap_or_else(|| CHANGE_PASSWORD_FAILED.to_string());
    tracing::warn!(status = status.as_u16(), error = %message, "Password change failed");
    Err(AppError::Api(message))
}
