//! # Client Configuration
//!
//! Configuration loaded from environment variables (and an optional `.env`
//! file, read by the binary before [`DashboardConfig::from_env`]).
//! Validated on startup to fail fast if misconfigured.
//!
//! | Variable | Default |
//! |---|---|
//! | `DASHBOARD_API_BASE_URL` | [`DEFAULT_API_BASE_URL`] |
//! | `DASHBOARD_REQUEST_TIMEOUT_SECS` | `10` |
//! | `DASHBOARD_MAX_RETRIES` | `3` |
//! | `DASHBOARD_RETRY_BASE_MS` | `1000` |
//! | `DASHBOARD_DATA_DIR` | `.dashboard` |
//! | `DASHBOARD_LOG_DIR` | `logs` |
//! | `RUST_LOG` | `dashboard=info,warn` |

use std::path::PathBuf;
use std::time::Duration;

use lib_utils::envs::{get_env_or, get_env_parse_or};

use crate::core::error::{AppError, Result};
use crate::services::revenue::RetryPolicy;

/// Remote API used when `DASHBOARD_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "https://phamdangtuc-001-site1.ntempurl.com/api";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "dashboard=info,warn";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the reporting API, without trailing slash
    pub api_base_url: String,

    /// Timeout applied to every HTTP request
    pub request_timeout_secs: u64,

    /// Attempts of the revenue summary call, first one included
    pub max_retries: u32,

    /// Backoff unit; the wait after attempt `n` is `n` times this
    pub retry_base_ms: u64,

    /// Directory of the token store
    pub data_dir: PathBuf,

    /// Directory of the rolling log files
    pub log_dir: PathBuf,

    /// `tracing` filter directives
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 10,
            max_retries: 3,
            retry_base_ms: 1000,
            data_dir: PathBuf::from(".dashboard"),
            log_dir: PathBuf::from("logs"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables take their defaults; a set but unparsable number is an
    /// error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            api_base_url: get_env_or("DASHBOARD_API_BASE_URL", &defaults.api_base_url)
                .trim_end_matches('/')
                .to_string(),
            request_timeout_secs: get_env_parse_or(
                "DASHBOARD_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            max_retries: get_env_parse_or("DASHBOARD_MAX_RETRIES", defaults.max_retries)?,
            retry_base_ms: get_env_parse_or("DASHBOARD_RETRY_BASE_MS", defaults.retry_base_ms)?,
            data_dir: PathBuf::from(get_env_or(
                "DASHBOARD_DATA_DIR",
                &defaults.data_dir.to_string_lossy(),
            )),
            log_dir: PathBuf::from(get_env_or(
                "DASHBOARD_LOG_DIR",
                &defaults.log_dir.to_string_lossy(),
            )),
            log_filter: get_env_or("RUST_LOG", &defaults.log_filter),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::Config("DASHBOARD_API_BASE_URL must not be empty".to_string()));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "DASHBOARD_API_BASE_URL must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "DASHBOARD_REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        if self.max_retries == 0 {
            return Err(AppError::Config("DASHBOARD_MAX_RETRIES must be at least 1".to_string()));
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_base_ms))
    }
}
