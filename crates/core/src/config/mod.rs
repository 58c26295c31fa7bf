//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (RESPCACHE_*)
//! 2. TOML config file (if RESPCACHE_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! [`AppConfig`] doubles as the stock [`SettingsProvider`] for the cache.

use std::collections::BTreeMap;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::provider::SettingsProvider;

mod validation;

pub use validation::ConfigError;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_FILE_ENV: &str = "RESPCACHE_CONFIG_FILE";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "RESPCACHE_";

/// Offline cache configuration.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (RESPCACHE_*)
/// 2. TOML config file (if RESPCACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Whether responses may be kept for offline use.
    ///
    /// Set via RESPCACHE_OFFLINE_CACHE_ENABLED environment variable.
    #[serde(default)]
    pub offline_cache_enabled: bool,

    /// URL-path fragment to TTL in seconds.
    ///
    /// Any cache key containing a fragment is subject to that TTL.
    #[serde(default)]
    pub offline_cache_whitelist: BTreeMap<String, u64>,
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `RESPCACHE_`
    /// 2. TOML file from `RESPCACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var(CONFIG_FILE_ENV) {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["CONFIG_FILE", "SESSION_TOKEN"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Enable offline caching with the given whitelist.
    pub fn with_whitelist<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self {
            offline_cache_enabled: true,
            offline_cache_whitelist: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl SettingsProvider for AppConfig {
    fn offline_cache_enabled(&self) -> bool {
        self.offline_cache_enabled
    }

    fn offline_cache_whitelist(&self) -> &BTreeMap<String, u64> {
        &self.offline_cache_whitelist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.offline_cache_enabled);
        assert!(config.offline_cache_whitelist.is_empty());
    }

    #[test]
    fn test_with_whitelist_enables_caching() {
        let config = AppConfig::with_whitelist([("/api/v1/apps/category/", 86_400)]);
        assert!(config.offline_cache_enabled());
        assert_eq!(config.offline_cache_whitelist().get("/api/v1/apps/category/"), Some(&86_400));
    }

    #[test]
    fn test_load_defaults() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "respcache.toml",
                r#"
                offline_cache_enabled = false

                [offline_cache_whitelist]
                "/api/v1/fireplace/consumer-info/" = 3600
                "/api/v1/apps/category/" = 86400
                "#,
            )?;
            jail.set_env("RESPCACHE_CONFIG_FILE", "respcache.toml");
            jail.set_env("RESPCACHE_OFFLINE_CACHE_ENABLED", "true");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert!(config.offline_cache_enabled);
            assert_eq!(config.offline_cache_whitelist.len(), 2);
            assert_eq!(config.offline_cache_whitelist.get("/api/v1/fireplace/consumer-info/"), Some(&3600));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_zero_ttl() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "respcache.toml",
                r#"
                [offline_cache_whitelist]
                "/api/v1/fireplace/search/featured/" = 0
                "#,
            )?;
            jail.set_env("RESPCACHE_CONFIG_FILE", "respcache.toml");

            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_load_bad_env_value() {
        Jail::expect_with(|jail| {
            jail.set_env("RESPCACHE_OFFLINE_CACHE_ENABLED", "sometimes");

            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::LoadFailed(_))));
            Ok(())
        });
    }
}
