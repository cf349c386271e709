//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DIRECTONE_HOST` - Bind address (default: 127.0.0.1)
//! - `DIRECTONE_PORT` - Listen port (default: 3000)
//! - `DIRECTONE_BASE_URL` - Public URL (default: <http://localhost:3000>).
//!   An `https://` URL marks session cookies `Secure`.
//! - `DIRECTONE_STATIC_DIR` - Directory served under `/static`
//!   (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory of static assets
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from("crates/storefront/static"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("DIRECTONE_HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidEnvVar("DIRECTONE_HOST".to_string(), e.to_string())
            })?,
            None => defaults.host,
        };
        let port = match lookup("DIRECTONE_PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("DIRECTONE_PORT".to_string(), e.to_string())
            })?,
            None => defaults.port,
        };

        let base_url = lookup("DIRECTONE_BASE_URL").unwrap_or(defaults.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar(
                "DIRECTONE_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }

        let static_dir = lookup("DIRECTONE_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(!config.is_secure());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DIRECTONE_HOST", "0.0.0.0"),
            ("DIRECTONE_PORT", "8080"),
            ("DIRECTONE_BASE_URL", "https://shop.directone.test"),
            ("DIRECTONE_STATIC_DIR", "/srv/static"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("DIRECTONE_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "DIRECTONE_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(load(&[("DIRECTONE_HOST", "localhost:80")]).is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(load(&[("DIRECTONE_BASE_URL", "shop.directone.test")]).is_err());
    }

    #[test]
    fn test_empty_sentry_dsn_is_ignored() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
