//! # User Endpoints

use shared::{CreateUserRequest, ListPayload, User};

use super::client::{server_message, ApiClient, SESSION_EXPIRED};
use crate::core::error::{AppError, Result};

/// `GET /users`. Accepts a plain array or a `$values` envelope.
pub async fn list_users(client: &ApiClient) -> Result<Vec<User>> {
    let payload: ListPayload<User> = client.get_json(client.get("users", None)).await?;
    let users = payload.into_vec();
    tracing::debug!(count = users.len(), "Users received");
    Ok(users)
}

/// `POST /users` with a bearer token.
#[tracing::instrument(skip(client, request, token), fields(username = %request.username))]
pub async fn create_user(client: &ApiClient, request: CreateUserRequest, token: &str) -> Result<()> {
    let response = ApiClient::send(
        client
            .client
            .post(client.url("users"))
            .bearer_auth(token)
            .json(&request),
    )
    .await?;

    let status = response.status();
    if status.is_success() {
        tracing::info!("User created");
        return Ok(());
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AppError::Authentication(SESSION_EXPIRED.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = server_message(&body).unwrap_or_else(|| "Could not create the user".to_string());
    tracing::warn!(status = status.as_u16(), error = %message, "User creation failed");
    Err(AppError::Api(message))
}
