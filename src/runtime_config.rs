//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `KVOLT_SLOW_LOOKUP_US`
//!
//! Lookups slower than this many microseconds are logged at `warn` level.
//! `0` or `off` disables timing entirely, removing the two clock reads from
//! every `find`.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use kvolt_router::runtime_config::RuntimeConfig;
//! use kvolt_router::Router;
//!
//! let router: Router<&str> = Router::with_config(RuntimeConfig::from_env());
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_LOOKUP_US: u64 = 1_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Warn about lookups slower than this; `None` disables lookup timing
    pub slow_lookup_threshold: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_lookup_threshold: Some(Duration::from_micros(DEFAULT_SLOW_LOOKUP_US)),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(env::var("KVOLT_SLOW_LOOKUP_US").ok().as_deref())
    }

    fn from_values(slow_lookup_us: Option<&str>) -> Self {
        let slow_lookup_threshold = match slow_lookup_us.map(str::trim) {
            Some("off") | Some("0") => None,
            Some(val) => Some(Duration::from_micros(
                val.parse().unwrap_or(DEFAULT_SLOW_LOOKUP_US),
            )),
            None => Some(Duration::from_micros(DEFAULT_SLOW_LOOKUP_US)),
        };
        RuntimeConfig {
            slow_lookup_threshold,
        }
    }

    /// Disable lookup timing (for benchmarks and latency-critical callers)
    #[must_use]
    pub fn without_lookup_timing() -> Self {
        Self {
            slow_lookup_threshold: None,
        }
    }
}
