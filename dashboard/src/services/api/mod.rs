//! # Remote API Client Module
//!
//! HTTP client for the remote business API.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs       - Module exports and documentation
//! ├── client.rs    - ApiClient struct, status classification, ApiService impl
//! ├── auth.rs      - Login and password change
//! ├── revenue.rs   - Revenue summary and weekly/monthly breakdowns
//! ├── users.rs     - User listing and creation
//! └── products.rs  - Product listing
//! ```

pub mod auth;
pub mod client;
pub mod products;
pub mod revenue;
pub mod users;

pub use client::{ApiClient, SESSION_EXPIRED};
