//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MOTO_SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `MOTO_SHOP_PORT` - Listen port (default: 3000)
//! - `MOTO_SHOP_DATA_DIR` - Directory for the persisted local-storage
//!   documents (default: ./data)
//! - `MOTO_SHOP_AUTH_LATENCY_MS` - Simulated latency for mock login and
//!   registration (default: 1000)
//! - `MOTO_SHOP_CHECKOUT_LATENCY_MS` - Simulated latency for order
//!   placement (default: 2000)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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
    /// Directory holding the persisted local-storage documents
    pub data_dir: PathBuf,
    /// Simulated latency for mock login/registration
    pub auth_latency: Duration,
    /// Simulated latency for order placement
    pub checkout_latency: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("MOTO_SHOP_HOST", "127.0.0.1")?;
        let port = parse_env("MOTO_SHOP_PORT", "3000")?;
        let data_dir = PathBuf::from(get_env_or_default("MOTO_SHOP_DATA_DIR", "./data"));
        let auth_latency_ms: u64 = parse_env("MOTO_SHOP_AUTH_LATENCY_MS", "1000")?;
        let checkout_latency_ms: u64 = parse_env("MOTO_SHOP_CHECKOUT_LATENCY_MS", "2000")?;

        Ok(Self {
            host,
            port,
            data_dir,
            auth_latency: Duration::from_millis(auth_latency_ms),
            checkout_latency: Duration::from_millis(checkout_latency_ms),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable with a default and parse it.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            auth_latency: Duration::from_millis(1000),
            checkout_latency: Duration::from_millis(2000),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        // Variable not set in the test environment
        let port: u16 = parse_env("MOTO_SHOP_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_env_rejects_bad_default() {
        let result: Result<u16, _> = parse_env("MOTO_SHOP_TEST_UNSET_PORT", "not-a-port");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
