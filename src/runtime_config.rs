//! # Runtime Configuration Module
//!
//! Environment-based tuning for the two concurrency ceilings.
//!
//! ## Environment Variables
//!
//! ### `APIGEN_REQUEST_CONCURRENCY`
//!
//! Maximum HTTP requests in flight across all generation jobs.
//! Default: `50`
//!
//! ### `APIGEN_API_CONCURRENCY`
//!
//! Maximum per-API generation jobs running at once. Each job issues its own
//! requests through the shared request ceiling, so raising this never raises
//! the request peak.
//! Default: `10`
//!
//! Zero or unparsable values fall back to the default.
//!
//! ## Usage
//!
//! ```rust
//! use apigen::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! assert!(config.request_concurrency >= 1);
//! ```

use std::env;

use crate::generator::{DEFAULT_API_CONCURRENCY, DEFAULT_REQUEST_CONCURRENCY};

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Ceiling for in-flight HTTP requests (default: 50)
    pub request_concurrency: usize,
    /// Ceiling for concurrent per-API jobs (default: 10)
    pub api_concurrency: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            request_concurrency: DEFAULT_REQUEST_CONCURRENCY,
            api_concurrency: DEFAULT_API_CONCURRENCY,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            request_concurrency: parse_ceiling(
                lookup("APIGEN_REQUEST_CONCURRENCY"),
                DEFAULT_REQUEST_CONCURRENCY,
            ),
            api_concurrency: parse_ceiling(lookup("APIGEN_API_CONCURRENCY"), DEFAULT_API_CONCURRENCY),
        }
    }
}

fn parse_ceiling(value: Option<String>, default: usize) -> usize {
    match value.and_then(|v| v.trim().parse::<usize>().ok()) {
        Some(0) | None => default,
        Some(n) => n,
    }
}
