//! # Services Module
//!
//! Remote API access, token persistence and the workflows built on them.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── api/        - HTTP client for the reporting backend
//! │                 (login, revenue, users, products)
//! ├── revenue/    - Revenue fetch workflow (validation, retry, normalization)
//! ├── session.rs  - Login, logout, startup restore
//! └── storage.rs  - Token persistence (file and memory)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      App / CLI                         │
//! │                                                        │
//! │  ┌────────────────┐  ┌────────────────┐                │
//! │  │ SessionService │  │ RevenueService │                │
//! │  └───────┬────────┘  └───────┬────────┘                │
//! │          │   ApiService      │   TokenStore            │
//! │  ┌───────▼───────────────────▼──┐  ┌────────────────┐  │
//! │  │ ApiClient (reqwest)          │  │ FileTokenStore │  │
//! │  └──────────────┬───────────────┘  └────────────────┘  │
//! └─────────────────┼──────────────────────────────────────┘
//!                   │ HTTP/JSON
//!                   ▼
//!   /users/login  /Orders/revenue[/weekly|/monthly]  /users  /Product
//! ```

pub mod api;
pub mod revenue;
pub mod session;
pub mod storage;
