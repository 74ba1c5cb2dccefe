//! # Utility Functions
//!
//! ## Modules
//!
//! - **[`validation`]**: Future-date validation for revenue reports
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Amount formatting
//! - [`lib_utils::time`]: Epoch-millisecond and calendar helpers

pub mod validation;
