//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! Production code wires [`crate::services::api::ApiClient`] and
//! [`crate::services::storage::FileTokenStore`]; tests substitute scripted
//! implementations.

use async_trait::async_trait;
use shared::{
    ChangePasswordRequest, CreateUserRequest, LoginPayload, MonthlyRevenue, Product, RevenueSummary,
    User, WeeklyRevenue,
};

use crate::core::error::Result;
use crate::services::revenue::RevenueQuery;

/// Trait for remote API operations
///
/// Implementations classify failures into [`crate::core::AppError`] variants:
/// HTTP 401 is `Authentication`, other failures are `Transient`, except for
/// login and user creation where a refusal is `Api`.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, username: String, password: String) -> Result<LoginPayload>;

    /// Aggregate revenue for the period described by `query`
    async fn revenue_summary(&self, query: &RevenueQuery, token: &str) -> Result<RevenueSummary>;

    /// Weekly breakdown of one month, as sent by the server (possibly sparse)
    async fn weekly_revenue(&self, year: i32, month: u32, token: &str) -> Result<Vec<WeeklyRevenue>>;

    /// Monthly breakdown of one year, as sent by the server (possibly sparse)
    async fn monthly_revenue(&self, year: i32, token: &str) -> Result<Vec<MonthlyRevenue>>;

    /// List all users
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Create a user
    async fn create_user(&self, request: CreateUserRequest, token: &str) -> Result<()>;

    /// List all products
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Change a user's password
    async fn change_password(&self, request: ChangePasswordRequest) -> Result<()>;
}

/// Trait for the persisted session token.
///
/// A single opaque string under a fixed key. `remove` is idempotent.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn remove(&self) -> Result<()>;
}
