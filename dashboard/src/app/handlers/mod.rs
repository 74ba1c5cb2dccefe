//! # Event Handlers
//!
//! User action handlers organized by domain.

pub mod auth;
pub mod dashboard;
pub mod navigation;
