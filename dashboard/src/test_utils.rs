//! Test doubles shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    ChangePasswordRequest, CreateUserRequest, LoginPayload, MonthlyRevenue, Product, RevenueSummary,
    User, WeeklyRevenue,
};

use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::services::revenue::RevenueQuery;

/// Scripted [`ApiService`].
///
/// Summary responses are taken from a queue first, then from the default.
/// Every call is counted.
pub struct MockApi {
    summary_queue: Mutex<VecDeque<Result<RevenueSummary>>>,
    summary: Mutex<Result<RevenueSummary>>,
    weekly: Mutex<Result<Vec<WeeklyRevenue>>>,
    monthly: Mutex<Result<Vec<MonthlyRevenue>>>,
    login: Mutex<Result<LoginPayload>>,
    users: Mutex<Result<Vec<User>>>,
    products: Mutex<Result<Vec<Product>>>,
    create_user: Mutex<Result<()>>,
    change_password: Mutex<Result<()>>,
    pub summary_calls: AtomicUsize,
    pub weekly_calls: AtomicUsize,
    pub monthly_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub create_user_calls: AtomicUsize,
    pub last_query: Mutex<Option<RevenueQuery>>,
    pub last_token: Mutex<Option<String>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            summary_queue: Mutex::new(VecDeque::new()),
            summary: Mutex::new(Ok(RevenueSummary::new(0.0))),
            weekly: Mutex::new(Ok(Vec::new())),
            monthly: Mutex::new(Ok(Vec::new())),
            login: Mutex::new(Ok(LoginPayload {
                token: "test-token".to_string(),
                user: None,
            })),
            users: Mutex::new(Ok(Vec::new())),
            products: Mutex::new(Ok(Vec::new())),
            create_user: Mutex::new(Ok(())),
            change_password: Mutex::new(Ok(())),
            summary_calls: AtomicUsize::new(0),
            weekly_calls: AtomicUsize::new(0),
            monthly_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            create_user_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            last_token: Mutex::new(None),
        }
    }
}

impl MockApi {
    pub fn with_summary(self, result: Result<RevenueSummary>) -> Self {
        *self.summary.lock() = result;
        self
    }

    /// Queue a one-shot summary response, served before the default.
    pub fn push_summary(self, result: Result<RevenueSummary>) -> Self {
        self.summary_queue.lock().push_back(result);
        self
    }

    pub fn with_weekly(self, result: Result<Vec<WeeklyRevenue>>) -> Self {
        *self.weekly.lock() = result;
        self
    }

    pub fn with_monthly(self, result: Result<Vec<MonthlyRevenue>>) -> Self {
        *self.monthly.lock() = result;
        self
    }

    pub fn with_login(self, result: Result<LoginPayload>) -> Self {
        *self.login.lock() = result;
        self
    }

    pub fn with_users(self, result: Result<Vec<User>>) -> Self {
        *self.users.lock() = result;
        self
    }

    pub fn with_products(self, result: Result<Vec<Product>>) -> Self {
        *self.products.lock() = result;
        self
    }

    pub fn with_create_user(self, result: Result<()>) -> Self {
        *self.create_user.lock() = result;
        self
    }

    pub fn with_change_password(self, result: Result<()>) -> Self {
        *self.change_password.lock() = result;
        self
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.weekly_calls.load(Ordering::SeqCst) + self.monthly_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiService for MockApi {
    async fn login(&self, _username: String, _password: String) -> Result<LoginPayload> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login.lock().clone()
    }

    async fn revenue_summary(&self, query: &RevenueQuery, token: &str) -> Result<RevenueSummary> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock() = Some(*query);
        *self.last_token.lock() = Some(token.to_string());
        let queued = self.summary_queue.lock().pop_front();
        queued.unwrap_or_else(|| self.summary.lock().clone())
    }

    async fn weekly_revenue(&self, _year: i32, _month: u32, _token: &str) -> Result<Vec<WeeklyRevenue>> {
        self.weekly_calls.fetch_add(1, Ordering::SeqCst);
        self.weekly.lock().clone()
    }

    async fn monthly_revenue(&self, _year: i32, _token: &str) -> Result<Vec<MonthlyRevenue>> {
        self.monthly_calls.fetch_add(1, Ordering::SeqCst);
        self.monthly.lock().clone()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.users.lock().clone()
    }

    async fn create_user(&self, _request: CreateUserRequest, _token: &str) -> Result<()> {
        self.create_user_calls.fetch_add(1, Ordering::SeqCst);
        self.create_user.lock().clone()
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.products.lock().clone()
    }

    async fn change_password(&self, _request: ChangePasswordRequest) -> Result<()> {
        self.change_password.lock().clone()
    }
}
