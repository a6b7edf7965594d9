//! # Runtime Configuration Module
//!
//! Environment-variable configuration read once at start-up.
//!
//! ## Environment Variables
//!
//! ### `VIEWROUTER_BASE_URL`
//!
//! Base path the application is served under, e.g. `/app/`. It is normalized
//! by [`WebHistory`](crate::history::WebHistory). Default: `/`.
//!
//! ### `VIEWROUTER_MAX_REDIRECTS`
//!
//! Maximum redirect hops in one resolution. Default: `8`. Unparseable values
//! fall back to the default.
//!
//! ## Usage
//!
//! ```rust
//! use viewrouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Base URL: {}", config.base_url);
//! ```

use std::env;
use tracing::warn;

use crate::router::DEFAULT_MAX_REDIRECTS;

/// Environment variable holding the base path.
pub const BASE_URL_VAR: &str = "VIEWROUTER_BASE_URL";
/// Environment variable holding the redirect hop limit.
pub const MAX_REDIRECTS_VAR: &str = "VIEWROUTER_MAX_REDIRECTS";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Base path the app is served under (default: `/`)
    pub base_url: String,
    /// Redirect hop limit (default: 8)
    pub max_redirects: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let max_redirects = match lookup(MAX_REDIRECTS_VAR) {
            Some(val) => val.trim().parse().unwrap_or_else(|_| {
                warn!(
                    var = MAX_REDIRECTS_VAR,
                    value = %val,
                    default = defaults.max_redirects,
                    "Invalid redirect limit, using default"
                );
                defaults.max_redirects
            }),
            None => defaults.max_redirects,
        };

        RuntimeConfig {
            base_url,
            max_redirects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]), RuntimeConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let config = config_from(&[(BASE_URL_VAR, "/app/"), (MAX_REDIRECTS_VAR, "3")]);
        assert_eq!(config.base_url, "/app/");
        assert_eq!(config.max_redirects, 3);
    }

    #[test]
    fn test_invalid_limit_falls_back() {
        let config = config_from(&[(MAX_REDIRECTS_VAR, "many")]);
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn test_blank_base_is_root() {
        let config = config_from(&[(BASE_URL_VAR, "  ")]);
        assert_eq!(config.base_url, "/");
    }
}
