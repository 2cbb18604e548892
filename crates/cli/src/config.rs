//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MARKET_LINK_AMAZON_USE_HTTP` - Use Amazon web URLs instead of `amzn://` (default: false)
//! - `MARKET_LINK_HOST_PACKAGE` - Package name of the calling app, used by fallback rules
//! - `MARKET_LINK_REGISTRY` - Path to a JSON file with extra storefront templates
//!
//! Command-line flags take precedence over these variables.

use std::path::PathBuf;

use market_link_core::{PackageName, ResolverConfig};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Market Link CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketLinkConfig {
    /// Use Amazon's web URL prefix instead of the native scheme
    pub amazon_use_http: bool,
    /// Package name of the calling application
    pub host_package: Option<PackageName>,
    /// Extra storefront templates to merge into the built-in registry
    pub registry_path: Option<PathBuf>,
}

impl MarketLinkConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let amazon_use_http = get_optional_env("MARKET_LINK_AMAZON_USE_HTTP")
            .map(|value| parse_bool("MARKET_LINK_AMAZON_USE_HTTP", &value))
            .transpose()?
            .unwrap_or(false);
        let host_package = get_optional_env("MARKET_LINK_HOST_PACKAGE").and_then(PackageName::new);
        let registry_path = get_optional_env("MARKET_LINK_REGISTRY").map(PathBuf::from);

        Ok(Self {
            amazon_use_http,
            host_package,
            registry_path,
        })
    }

    /// Resolver settings derived from this configuration.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            prefer_native_scheme: !self.amazon_use_http,
            host_package: self.host_package.clone(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Parse a boolean flag value.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got `{other}`"),
        )),
    }
}
