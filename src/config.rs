//! Configuration management for gantry
//!
//! This module provides a configuration system that loads settings from
//! environment variables with sensible defaults. Configuration includes the
//! target cloud project, deployment region, expected load tier, and runtime
//! parameters.
//!
//! # Environment Variables
//!
//! - `GANTRY_PROJECT_ID`: Cloud project used for deployments and secret
//!   references - no default, required for deployment operations
//! - `GANTRY_REGION`: Deployment region - default: "us-central1"
//! - `GANTRY_EXPECTED_LOAD`: Default load tier (low|medium|high) - default: "medium"
//! - `GANTRY_REQUEST_TIMEOUT`: Collaborator request timeout in seconds - default: "30"
//! - `GANTRY_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use gantry::GantryConfig;
//!
//! let config = GantryConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Deploying to {}", config.region);
//! ```

use crate::services::optimization::LoadTier;
use std::env;
use thiserror::Error;

const DEFAULT_REGION: &str = "us-central1";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for gantry
///
/// Constructed via `Default::default()`, which loads from `GANTRY_*`
/// environment variables with fallback defaults for missing values.
#[derive(Debug, Clone)]
pub struct GantryConfig {
    /// Cloud project id for deployments and secret references
    pub project_id: Option<String>,

    /// Deployment region
    pub region: String,

    /// Default expected load tier for resource sizing
    pub expected_load: LoadTier,

    /// Collaborator request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GantryConfig {
    fn default() -> Self {
        let expected_load = env::var("GANTRY_EXPECTED_LOAD")
            .map(|s| LoadTier::parse(&s))
            .unwrap_or(LoadTier::Medium);

        let request_timeout_secs = env::var("GANTRY_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            project_id: env::var("GANTRY_PROJECT_ID").ok(),
            region: env::var("GANTRY_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            expected_load,
            request_timeout_secs,
            log_level: env::var("GANTRY_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl GantryConfig {
    /// Validates the configuration, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "region cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationFailed(format!(
                "invalid log level: {} (valid: trace, debug, info, warn, error)",
                other
            ))),
        }
    }

    /// Returns the configured project id or an error naming the variable to set
    pub fn require_project_id(&self) -> Result<&str, ConfigError> {
        self.project_id.as_deref().ok_or_else(|| {
            ConfigError::ValidationFailed(
                "project id not configured. Set GANTRY_PROJECT_ID".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> GantryConfig {
        GantryConfig {
            project_id: Some("demo-project".to_string()),
            region: DEFAULT_REGION.to_string(),
            expected_load: LoadTier::Medium,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = GantryConfig {
            request_timeout_secs: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let config = GantryConfig {
            log_level: "verbose".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_region_rejected() {
        let config = GantryConfig {
            region: String::new(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_require_project_id() {
        assert_eq!(base_config().require_project_id().unwrap(), "demo-project");

        let config = GantryConfig {
            project_id: None,
            ..base_config()
        };
        assert!(config.require_project_id().is_err());
    }
}
