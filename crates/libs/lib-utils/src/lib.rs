//! # Utilities Library
//!
//! Shared helpers for environment variables and calendar time.

pub mod envs;
pub mod time;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{
    date_from_millis, format_date, now_local, parse_date, start_of_day_millis, to_epoch_millis,
};
