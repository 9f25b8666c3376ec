//! # Runtime Configuration Module
//!
//! Router behavior that deployments tune without recompiling.
//!
//! ## Environment Variables
//!
//! ### `ROUTEWERK_STRICT_SLASH`
//!
//! When `true`, `/a` and `/a/` are different paths for every pattern
//! registered afterwards. Default: `false`.
//!
//! ### `ROUTEWERK_PANIC_RECOVERY`
//!
//! When `true`, routers built from the configuration catch handler panics and
//! report them as `500` errors. Default: `false`.
//!
//! ## Config File
//!
//! The same settings can be read from TOML:
//!
//! ```toml
//! strict_slash = true
//! panic_recovery = true
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use routewerk::runtime_config::RouterConfig;
//! use routewerk::Router;
//!
//! let config = RouterConfig::from_env();
//! let router = Router::with_config(&config);
//! assert_eq!(router.strict_slash(), config.strict_slash);
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const STRICT_SLASH_ENV: &str = "ROUTEWERK_STRICT_SLASH";
pub const PANIC_RECOVERY_ENV: &str = "ROUTEWERK_PANIC_RECOVERY";

/// Settings applied to routers and the service entry point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Distinguish paths that differ only by a trailing slash
    pub strict_slash: bool,
    /// Catch handler panics and turn them into `500` errors
    pub panic_recovery: bool,
}

impl RouterConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).and_then(|value| parse_flag(&value));
        let defaults = Self::default();
        Self {
            strict_slash: flag(STRICT_SLASH_ENV).unwrap_or(defaults.strict_slash),
            panic_recovery: flag(PANIC_RECOVERY_ENV).unwrap_or(defaults.panic_recovery),
        }
    }

    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or a value has the
    /// wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse router configuration")
    }

    /// Read and parse a TOML config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, case-insensitively
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
