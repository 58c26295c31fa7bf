//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - a whitelist fragment is empty (it would match every key)
    /// - a whitelist TTL is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (fragment, ttl) in &self.offline_cache_whitelist {
            if fragment.is_empty() {
                return Err(ConfigError::Invalid {
                    field: "offline_cache_whitelist".into(),
                    reason: "fragments must not be empty".into(),
                });
            }
            if *ttl == 0 {
                return Err(ConfigError::Invalid {
                    field: "offline_cache_whitelist".into(),
                    reason: format!("TTL for {fragment} must be greater than 0"),
                });
            }
        }

        if self.offline_cache_enabled && self.offline_cache_whitelist.is_empty() {
            tracing::warn!("offline_cache_enabled is set but offline_cache_whitelist is empty; nothing will expire");
        }

        Ok(())
    }
}
