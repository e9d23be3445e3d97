//! Application configuration from file and environment variables
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables (prefixed with HANDA_, double underscore
//!    between table and key: HANDA_PUSH__API_KEY)
//! 2. Config file (config.toml)
//! 3. Default values
//!
//! Secrets like the push gateway key should be kept in environment
//! variables, not in the config file.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Global application configuration
pub static APP_CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| {
    RwLock::new(AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config file, using defaults: {}", e);
        AppConfig::default()
    }))
});

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub base_url: String,
    /// Bind address for the HTTP server
    pub bind: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Handa".to_string(),
            description: "Disaster-preparedness coalition platform".to_string(),
            base_url: "http://localhost:8080".to_string(),
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Auth token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token lifetime in hours
    pub token_lifetime_hours: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_lifetime_hours: 72,
        }
    }
}

/// Listing/pagination limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Default rows per page for list endpoints
    pub per_page_default: u64,
    /// Hard cap on rows per page
    pub per_page_max: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            per_page_default: 15,
            per_page_max: 100,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend. Only "local" is implemented.
    pub backend: String,
    /// Local storage path (used when backend = "local")
    pub local_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            local_path: "./uploads".to_string(),
        }
    }
}

/// Push notification gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Enable push delivery. When false, sends are logged and dropped.
    pub enabled: bool,
    /// HTTP endpoint of the delivery provider
    pub gateway_url: String,
    /// Provider API key (should be in env var HANDA_PUSH__API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// Delivery attempts before giving up
    pub max_attempts: u32,
    /// Per-attempt timeout in seconds
    pub attempt_timeout_seconds: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            gateway_url: "http://localhost:9400/send".to_string(),
            api_key: String::new(),
            max_attempts: 3,
            attempt_timeout_seconds: 60,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub auth: AuthConfig,
    pub limits: LimitsConfig,
    pub storage: StorageConfig,
    pub push: PushConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &str) -> Result<Self, ConfigError> {
        use config::FileFormat;

        let config = Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file (optional)
            .add_source(File::new(path, FileFormat::Toml).required(false))
            // Override with environment variables (HANDA_ prefix).
            // Double underscore separates table from key so snake_case
            // keys stay addressable: HANDA_SITE__BIND, HANDA_PUSH__API_KEY,
            // HANDA_AUTH__TOKEN_LIFETIME_HOURS.
            .add_source(
                Environment::with_prefix("HANDA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Initialize application configuration
///
/// This triggers the lazy loading of the config file and logs the result.
/// Should be called early in application startup.
pub fn init() {
    let config = APP_CONFIG.read().unwrap();
    log::info!("Configuration loaded: site.name = {}", config.site.name);
}

// Convenience functions for accessing global config

/// Get the current application configuration
pub fn get_config() -> AppConfig {
    APP_CONFIG.read().map(|c| c.clone()).unwrap_or_default()
}

/// Get site configuration
pub fn site() -> SiteConfig {
    get_config().site
}

/// Get auth configuration
pub fn auth() -> AuthConfig {
    get_config().auth
}

/// Get limits configuration
pub fn limits() -> LimitsConfig {
    get_config().limits
}

/// Get storage configuration
pub fn storage() -> StorageConfig {
    get_config().storage
}

/// Get push configuration
pub fn push() -> PushConfig {
    get_config().push
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.site.name, "Handa");
        assert_eq!(config.limits.per_page_default, 15);
        assert_eq!(config.push.max_attempts, 3);
        assert_eq!(config.push.attempt_timeout_seconds, 60);
    }

    #[test]
    fn test_push_disabled_by_default() {
        let config = AppConfig::default();
        assert!(!config.push.enabled);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[site]
name = "Test Coalition"
bind = "127.0.0.1:9999"

[limits]
per_page_default = 25

[push]
enabled = true
gateway_url = "https://push.example.com/send"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(temp_file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.site.name, "Test Coalition");
        assert_eq!(config.site.bind, "127.0.0.1:9999");
        assert_eq!(config.limits.per_page_default, 25);
        assert!(config.push.enabled);
        assert_eq!(config.push.gateway_url, "https://push.example.com/send");
        // Defaults should still apply for unspecified values
        assert_eq!(config.limits.per_page_max, 100);
    }

    #[test]
    fn test_env_var_overrides_snake_case_key() {
        // No other test reads push.api_key, so this var cannot race
        std::env::set_var("HANDA_PUSH__API_KEY", "key-from-env");

        let config = AppConfig::load_from_path("/nonexistent/config.toml").unwrap();
        assert_eq!(config.push.api_key, "key-from-env");

        std::env::remove_var("HANDA_PUSH__API_KEY");
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = AppConfig::load_from_path("/nonexistent/config.toml").unwrap();
        assert_eq!(config.site.name, "Handa");
        assert_eq!(config.auth.token_lifetime_hours, 72);
    }
}
