//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`ApiService`, `TokenStore`)
//! - **[`clock`]**: Source of "today" (`Clock`, `SystemClock`, `FixedClock`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::core::{ApiService, TokenStore};
//! use dashboard::services::{api::ApiClient, storage::MemoryTokenStore};
//!
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new("http://127.0.0.1:5000/api", 10).unwrap());
//! let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::default());
//! ```

pub mod clock;
pub mod error;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, Result};
pub use service::{ApiService, TokenStore};
