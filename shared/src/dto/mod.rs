//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with the remote API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login request, token payload decoding, password change
//! - [`revenue`] - Revenue summary, weekly and monthly buckets
//! - [`users`] - User records, user creation, role mapping
//! - [`products`] - Product records
//! - [`envelope`] - The `$values` collection envelope
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /Orders/revenue/weekly?year=2024&month=3
//! Authorization: Bearer eyJhbGciOi...
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! [
//!   { "weekOfMonth": 1, "revenue": 20000 },
//!   { "weekOfMonth": 2, "revenue": 25000 }
//! ]
//! ```

pub mod auth;
pub mod envelope;
pub mod products;
pub mod revenue;
pub mod users;

pub use auth::*;
pub use envelope::*;
pub use products::*;
pub use revenue::*;
pub use users::*;
