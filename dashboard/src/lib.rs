//! # Business Dashboard Client - Library Root
//!
//! Client for a business reporting API: session handling, the revenue
//! dashboard and the product and user listings. This library crate contains
//! all modules used by the `dashboard` binary (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              dashboard (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - State container, handlers, async tasks   │
//! │  services   - API client, token store, workflows       │
//! │  core       - Errors, service traits, clock            │
//! │  config     - Environment configuration                │
//! │  logger     - tracing setup (daily log files)          │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTPS (reqwest, bearer token)
//!          ▼
//! ┌─────────────────────────────────────────┐
//! │  Reporting API                          │
//! │  /users/login  /Orders/revenue*         │
//! │  /users        /Product                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Revenue reports
//!
//! A report is requested for a day, a month or a year. Month reports carry 4
//! weekly buckets and year reports carry 12 monthly buckets, always complete
//! and in period order. The summary call is retried on transient failures
//! with linear backoff; a `401` ends the session instead.
//!
//! ## Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── config, logger
//!   └── app (state, events, handlers, tasks)
//!       ├── services::session  (login, logout, restore)
//!       ├── services::revenue  (validation, retry, normalization)
//!       │     └── services::api (HTTP) + services::storage (token)
//!       └── utils::validation  (future-date checks)
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod logger;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::app::{App, AppServices};
pub use crate::config::DashboardConfig;
pub use crate::core::{AppError, Result};
