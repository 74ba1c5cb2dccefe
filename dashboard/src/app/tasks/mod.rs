//! # Async Tasks
//!
//! Background tasks for revenue fetches, listings and account forms.

pub mod catalog;
pub mod revenue;
