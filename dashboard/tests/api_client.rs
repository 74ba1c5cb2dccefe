//! End-to-end tests of the HTTP client and the revenue workflow against a
//! local stub of the reporting API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::{json, Value};

use dashboard::core::{ApiService, AppError, FixedClock};
use dashboard::services::api::{ApiClient, SESSION_EXPIRED};
use dashboard::services::revenue::{RetryPolicy, RevenueQuery, RevenueService};
use dashboard::services::storage::MemoryTokenStore;
use shared::{ChangePasswordRequest, CreateUserRequest, RevenueDetails, WeeklyRevenue};

/// What the stub saw.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    auth: Arc<Mutex<Vec<Option<String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    fn hit(&self, headers: &HeaderMap, query: HashMap<String, String>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query);
        self.auth.lock().push(
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        );
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_query(&self) -> HashMap<String, String> {
        self.queries.lock().last().cloned().unwrap_or_default()
    }
}

/// Serve `router` on an ephemeral port; returns the API base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn workflow(base_url: &str, retry: RetryPolicy) -> RevenueService {
    RevenueService::new(
        Arc::new(ApiClient::new(base_url, 5).unwrap()),
        Arc::new(MemoryTokenStore::with_token("tok")),
        Arc::new(FixedClock::new(today())),
        retry,
    )
}

#[tokio::test]
async fn test_summary_query_string_and_bearer() {
    let rec = Recorder::default();
    let router = Router::new()
        .route(
            "/api/Orders/revenue",
            get(
                |State(rec): State<Recorder>, headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                    rec.hit(&headers, q);
                    Json(json!({ "id": 1, "revenue": 1500.5, "orderCount": 4 }))
                },
            ),
        )
        .with_state(rec.clone());
    let client = ApiClient::new(serve(router).await, 5).unwrap();

    let day = RevenueQuery::new(Some(14), Some(3), 2024).unwrap();
    let summary = client.revenue_summary(&day, "tok").await.unwrap();

    assert_eq!(summary.revenue, 1500.5);
    assert_eq!(summary.id, Some(1));
    assert_eq!(summary.extra["orderCount"], 4);
    let query = rec.last_query();
    assert_eq!(query.get("day").map(String::as_str), Some("14"));
    assert_eq!(query.get("month").map(String::as_str), Some("3"));
    assert_eq!(query.get("year").map(String::as_str), Some("2024"));
    assert_eq!(rec.auth.lock()[0].as_deref(), Some("Bearer tok"));

    let year = RevenueQuery::new(None, None, 2023).unwrap();
    client.revenue_summary(&year, "tok").await.unwrap();
    let query = rec.last_query();
    assert_eq!(query.len(), 1);
    assert_eq!(query.get("year").map(String::as_str), Some("2023"));
}

#[tokio::test]
async fn test_month_report_end_to_end() {
    let weekly = Recorder::default();
    let router = Router::new()
        .route("/api/Orders/revenue", get(|| async { Json(json!({ "revenue": 90000 })) }))
        .route(
            "/api/Orders/revenue/weekly",
            get(
                |State(rec): State<Recorder>, headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                    rec.hit(&headers, q);
                    Json(json!([
                        { "weekOfMonth": 2, "revenue": 25000 },
                        { "weekOfMonth": 1, "revenue": 20000 }
                    ]))
                },
            ),
        )
        .with_state(weekly.clone());
    let svc = workflow(&serve(router).await, RetryPolicy::default());

    let result = svc
        .fetch_revenue(&RevenueQuery::new(None, Some(3), 2024).unwrap())
        .await
        .unwrap();

    assert_eq!(result.total_revenue(), 90000.0);
    assert_eq!(
        result.details,
        Some(RevenueDetails::Weekly(vec![
            WeeklyRevenue { week_of_month: 1, revenue: 20000.0 },
            WeeklyRevenue { week_of_month: 2, revenue: 25000.0 },
            WeeklyRevenue { week_of_month: 3, revenue: 0.0 },
            WeeklyRevenue { week_of_month: 4, revenue: 0.0 },
        ]))
    );
    let query = weekly.last_query();
    assert_eq!(query.get("year").map(String::as_str), Some("2024"));
    assert_eq!(query.get("month").map(String::as_str), Some("3"));
}

#[tokio::test]
async fn test_year_report_detail_failure_zero_fills() {
    let router = Router::new()
        .route("/api/Orders/revenue", get(|| async { Json(json!({ "revenue": 42 })) }))
        .route(
            "/api/Orders/revenue/monthly",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let svc = workflow(&serve(router).await, RetryPolicy::default());

    let result = svc
        .fetch_revenue(&RevenueQuery::new(None, None, 2023).unwrap())
        .await
        .unwrap();

    assert_eq!(result.total_revenue(), 42.0);
    let details = result.details.unwrap();
    assert_eq!(details.len(), 12);
    assert_eq!(details.values(), vec![0.0; 12]);
}

#[tokio::test]
async fn test_day_report_never_calls_breakdown() {
    let detail = Recorder::default();
    let router = Router::new()
        .route("/api/Orders/revenue", get(|| async { Json(json!({ "revenue": 7 })) }))
        .route(
            "/api/Orders/revenue/monthly",
            get(|State(rec): State<Recorder>, headers: HeaderMap| async move {
                rec.hit(&headers, HashMap::new());
                Json(json!([]))
            }),
        )
        .with_state(detail.clone());
    let svc = workflow(&serve(router).await, RetryPolicy::default());

    let result = svc
        .fetch_revenue(&RevenueQuery::new(Some(1), Some(6), 2024).unwrap())
        .await
        .unwrap();

    assert_eq!(result.details, None);
    assert_eq!(detail.calls(), 0);
}

#[tokio::test]
async fn test_unauthorized_summary_is_called_once() {
    let rec = Recorder::default();
    let router = Router::new()
        .route(
            "/api/Orders/revenue",
            get(|State(rec): State<Recorder>, headers: HeaderMap| async move {
                rec.hit(&headers, HashMap::new());
                StatusCode::UNAUTHORIZED
            }),
        )
        .with_state(rec.clone());
    let svc = workflow(&serve(router).await, RetryPolicy::new(3, Duration::from_millis(20)));

    let err = svc
        .fetch_revenue(&RevenueQuery::new(None, None, 2024).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, AppError::Authentication(SESSION_EXPIRED.to_string()));
    assert!(err.requires_logout());
    assert_eq!(rec.calls(), 1);
}

#[tokio::test]
async fn test_server_error_is_retried_with_backoff() {
    let rec = Recorder::default();
    let router = Router::new()
        .route(
            "/api/Orders/revenue",
            get(|State(rec): State<Recorder>, headers: HeaderMap| async move {
                rec.hit(&headers, HashMap::new());
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "boom" })))
            }),
        )
        .with_state(rec.clone());
    let svc = workflow(&serve(router).await, RetryPolicy::new(3, Duration::from_millis(20)));

    let start = Instant::now();
    let err = svc
        .fetch_revenue(&RevenueQuery::new(None, None, 2024).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, AppError::Transient("HTTP 500: boom".to_string()));
    assert_eq!(rec.calls(), 3);
    // 20ms after the first attempt, 40ms after the second
    assert!(start.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn test_server_error_then_success() {
    let rec = Recorder::default();
    let router = Router::new()
        .route(
            "/api/Orders/revenue",
            get(|State(rec): State<Recorder>, headers: HeaderMap| async move {
                rec.hit(&headers, HashMap::new());
                if rec.calls() < 2 {
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})))
                } else {
                    (StatusCode::OK, Json(json!({ "revenue": 5 })))
                }
            }),
        )
        .with_state(rec.clone());
    let svc = workflow(&serve(router).await, RetryPolicy::new(3, Duration::from_millis(10)));

    let result = svc
        .fetch_revenue(&RevenueQuery::new(Some(3), Some(6), 2024).unwrap())
        .await
        .unwrap();

    assert_eq!(result.total_revenue(), 5.0);
    assert_eq!(rec.calls(), 2);
}

#[tokio::test]
async fn test_request_timeout_is_transient() {
    let router = Router::new().route(
        "/api/Orders/revenue",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "revenue": 1 }))
        }),
    );
    let client = ApiClient::new(serve(router).await, 1).unwrap();

    let err = client
        .revenue_summary(&RevenueQuery::new(None, None, 2024).unwrap(), "tok")
        .await
        .unwrap_err();

    assert_eq!(err, AppError::Transient("Request timed out".to_string()));
}

#[tokio::test]
async fn test_login_accepts_token_shapes() {
    let router = Router::new()
        .route("/api/raw/users/login", post(|| async { "raw-token" }))
        .route("/api/quoted/users/login", post(|| async { Json(json!("quoted-token")) }))
        .route(
            "/api/object/users/login",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "token": "object-token",
                    "user": { "id": 5, "username": body["username"], "roleId": 1 }
                }))
            }),
        )
        .route(
            "/api/rejected/users/login",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid password" }))) }),
        );
    let base = serve(router).await;

    let raw = ApiClient::new(format!("{}/raw", base), 5).unwrap();
    assert_eq!(raw.login("a".into(), "b".into()).await.unwrap().token, "raw-token");

    let quoted = ApiClient::new(format!("{}/quoted", base), 5).unwrap();
    assert_eq!(quoted.login("a".into(), "b".into()).await.unwrap().token, "quoted-token");

    let object = ApiClient::new(format!("{}/object", base), 5).unwrap();
    let payload = object.login("admin".into(), "b".into()).await.unwrap();
    assert_eq!(payload.token, "object-token");
    let user = payload.user.unwrap();
    assert_eq!(user.username, "admin");
    assert_eq!(user.role(), shared::Role::Admin);

    let rejected = ApiClient::new(format!("{}/rejected", base), 5).unwrap();
    assert_eq!(
        rejected.login("a".into(), "b".into()).await.unwrap_err(),
        AppError::Api("Invalid password".to_string())
    );
}

#[tokio::test]
async fn test_listing_envelopes() {
    let router = Router::new()
        .route(
            "/api/Product",
            get(|| async {
                Json(json!({
                    "data": { "$values": [
                        { "id": 1, "name": "Espresso", "price": 30000 },
                        { "id": 2, "name": "Cake", "description": "Cheese" }
                    ] }
                }))
            }),
        )
        .route(
            "/api/users",
            get(|| async { Json(json!({ "$values": [{ "id": 9, "username": "bob", "fullName": "Bob B" }] })) }),
        )
        .route("/api/empty/Product", get(|| async { Json(json!({})) }))
        .route("/api/empty/users", get(|| async { Json(json!([])) }));
    let base = serve(router).await;
    let client = ApiClient::new(base.clone(), 5).unwrap();

    let products = client.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, 30000.0);
    assert_eq!(products[1].price, 0.0);
    assert_eq!(products[1].description.as_deref(), Some("Cheese"));

    let users = client.list_users().await.unwrap();
    assert_eq!(users[0].display_name(), "Bob B");

    let empty = ApiClient::new(format!("{}/empty", base), 5).unwrap();
    assert!(empty.list_products().await.unwrap().is_empty());
    assert!(empty.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_user_and_change_password_bodies() {
    let rec = Recorder::default();
    let router = Router::new()
        .route(
            "/api/users",
            post(|State(rec): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>| async move {
                rec.hit(&headers, HashMap::new());
                rec.bodies.lock().push(body);
                StatusCode::CREATED
            }),
        )
        .route(
            "/api/users/change-password",
            post(|State(rec): State<Recorder>, Json(body): Json<Value>| async move {
                rec.bodies.lock().push(body);
                (StatusCode::BAD_REQUEST, Json(json!({ "message": "Passwords do not match" })))
            }),
        )
        .with_state(rec.clone());
    let client = ApiClient::new(serve(router).await, 5).unwrap();

    client
        .create_user(
            CreateUserRequest {
                username: "neo".into(),
                email: "neo@example.com".into(),
                password: "pw".into(),
                full_name: "Thomas Anderson".into(),
                gender: true,
                role_name: "Staff".into(),
                ..Default::default()
            },
            "tok",
        )
        .await
        .unwrap();

    let err = client
        .change_password(ChangePasswordRequest {
            username: "neo".into(),
            password: "a".into(),
            confirm_password: "b".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Api("Passwords do not match".to_string()));

    let bodies = rec.bodies.lock();
    assert_eq!(bodies[0]["fullName"], "Thomas Anderson");
    assert_eq!(bodies[0]["roleName"], "Staff");
    assert_eq!(bodies[0]["gender"], true);
    assert_eq!(bodies[1]["confirmPassword"], "b");
    assert_eq!(rec.auth.lock()[0].as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn test_create_user_unauthorized() {
    let router = Router::new().route("/api/users", post(|| async { StatusCode::UNAUTHORIZED }));
    let client = ApiClient::new(serve(router).await, 5).unwrap();

    let err = client
        .create_user(CreateUserRequest::default(), "stale")
        .await
        .unwrap_err();

    assert!(err.requires_logout());
}
