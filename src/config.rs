//! # Generator Configuration
//!
//! Process-level settings loaded from environment variables.
//!
//! kustomize invokes exec plugins with a single argument (the plugin config
//! path), so everything beyond that argument is configured through the
//! environment.

use crate::constants::{DEFAULT_LOG_LEVEL, ENV_LOG_COLOR, ENV_LOG_LEVEL, ENV_SOPS_BINARY};
use std::path::PathBuf;

/// Generator configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Explicit path to the sops executable
    /// When unset, `sops` is looked up on PATH at the first decryption
    pub sops_binary: Option<PathBuf>,
    /// Log level used when `RUST_LOG` is not set (error, warn, info, debug, trace)
    pub log_level: String,
    /// Enable color in log output
    pub log_enable_color: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sops_binary: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_enable_color: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            sops_binary: lookup(ENV_SOPS_BINARY).map(PathBuf::from),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_enable_color: lookup(ENV_LOG_COLOR)
                .map_or(defaults.log_enable_color, |v| parse_bool(&v)),
        }
    }

    /// Tracing filter directive for this crate at the configured level
    #[must_use]
    pub fn log_directive(&self) -> String {
        format!(
            "sops_secret_generator={level},SopsSecret={level}",
            level = self.log_level.to_lowercase()
        )
    }
}

/// Read a boolean the way the deployment tooling writes them
fn parse_bool(value: &str) -> bool {
    let v_lower = value.trim().to_lowercase();
    v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
}
