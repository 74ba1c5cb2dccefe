//! # API Client
//!
//! Main HTTP client for the remote business API.
//!
//! Response classification lives here so every endpoint agrees on it:
//! 401 becomes [`AppError::Authentication`], any other non-success status,
//! network failure, timeout or undecodable body becomes [`AppError::Transient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    ChangePasswordRequest, CreateUserRequest, ErrorResponse, LoginPayload, MonthlyRevenue, Product,
    RevenueSummary, User, WeeklyRevenue,
};

use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::revenue::RevenueQuery;

/// Message used when the server rejects the session token.
pub const SESSION_EXPIRED: &str = "Session expired. Please sign in again.";

/// HTTP client for communicating with the remote API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for `base_url` (e.g. `https://host/api`).
    ///
    /// Every request is bounded by `timeout_secs`.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a GET request, with a bearer token when given.
    pub(crate) fn get(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.get(self.url(path)).header("Accept", "*/*");
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request, mapping transport failures to `Transient`.
    pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            tracing::warn!(error = %e, timeout = e.is_timeout(), "Network error");
            if e.is_timeout() {
                AppError::Transient("Request timed out".to_string())
            } else {
                AppError::Transient(format!("Network error: {}", e))
            }
        })
    }

    /// Pass a success response through, classify anything else.
    pub(crate) async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Request failed");

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Authentication(SESSION_EXPIRED.to_string()));
        }

        Err(AppError::Transient(format!(
            "HTTP {}: {}",
            status.as_u16(),
            server_message(&body).unwrap_or_else(|| "Request failed".to_string())
        )))
    }

    /// Decode a success body, mapping parse failures to `Transient`.
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!(error = %e, "Response parse error");
            AppError::Transient(format!("Failed to parse response: {}", e))
        })
    }

    /// Send `request`, classify the status and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = Self::send(request).await?;
        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }
}

/// Extract a readable message from an error body: the JSON `message`/`error`/
/// `title` field when present, the raw text otherwise.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => err.message().map(str::to_string),
        Err(_) if body.starts_with('<') => None, // HTML error page
        Err(_) => Some(body.to_string()),
    }
}

// Implement ApiService trait for ApiClient
#[async_trait]
impl ApiService for ApiClient {
    async fn login(&self, username: String, password: String) -> Result<LoginPayload> {
        crate::services::api::auth::login(self, username, password).await
    }

    async fn revenue_summary(&self, query: &RevenueQuery, token: &str) -> Result<RevenueSummary> {
        crate::services::api::revenue::get_summary(self, query, token).await
    }

    async fn weekly_revenue(&self, year: i32, month: u32, token: &str) -> Result<Vec<WeeklyRevenue>> {
        crate::services::api::revenue::get_weekly(self, year, month, token).await
    }

    async fn monthly_revenue(&self, year: i32, token: &str) -> Result<Vec<MonthlyRevenue>> {
        crate::services::api::revenue::get_monthly(self, year, token).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        crate::services::api::users::list_users(self).await
    }

    async fn create_user(&self, request: CreateUserRequest, token: &str) -> Result<()> {
        crate::services::api::users::create_user(self, request, token).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        crate::services::api::products::list_products(self).await
    }

    async fn change_password(&self, request: ChangePasswordRequest) -> Result<()> {
        crate::services::api::auth::change_password(self, request).await
    }
}
