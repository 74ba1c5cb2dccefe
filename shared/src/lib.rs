//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the dashboard client and the remote
//! business API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, token payloads and password change
//!   - **[`dto::revenue`]**: Revenue summary and period buckets
//!   - **[`dto::users`]**: User records and user creation
//!   - **[`dto::products`]**: Product records
//! - **[`utils`]**: Shared display helpers
//!   - **[`utils::format_vnd`]**: Format an amount with thousands separators
//!
//! ## Wire Format
//!
//! The remote API speaks **camelCase** JSON and wraps some collections in a
//! `$values` envelope. Every response type documents its fallback values once,
//! on the type, instead of guessing shapes at each call site:
//!
//! - Missing numeric fields decode as `0`
//! - Missing optional text fields decode as `None`
//! - Missing collections decode as empty
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::revenue::RevenueSummary;
//!
//! let summary: RevenueSummary = serde_json::from_str(r#"{"id":7,"revenue":90000}"#).unwrap();
//! assert_eq!(summary.revenue, 90000.0);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
