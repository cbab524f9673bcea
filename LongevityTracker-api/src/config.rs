//! Application configuration
//!
//! Everything is read once at startup. `.env` is loaded by the binary before
//! [`AppConfig::from_env`] is called.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use longevity_tracker_data::database::{parse_setting, DatabaseConfig, DatabaseError};

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
    /// Upper bound on handling one request, in seconds
    pub request_timeout_seconds: u64,
    /// Deployment environment reported by the health check
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            request_timeout_seconds: 30,
            environment: "development".to_string(),
        }
    }
}

impl ServerConfig {
    /// Socket address to listen on
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Data store settings
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Read the configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary key lookup, using defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let server = ServerConfig {
            host: parse_setting(&lookup, "HOST", defaults.host)?,
            port: parse_setting(&lookup, "PORT", defaults.port)?,
            request_timeout_seconds: parse_setting(
                &lookup,
                "REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            )?,
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        Ok(Self {
            server,
            database: DatabaseConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(|name| match name {
            "HOST" => Some("127.0.0.1".to_string()),
            "PORT" => Some("3030".to_string()),
            "APP_ENV" => Some("production".to_string()),
            "MYSQL_DATABASE" => Some("longevity_test".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:3030");
        assert_eq!(config.server.environment, "production");
        assert_eq!(config.database.database, "longevity_test");
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let result = AppConfig::from_lookup(|name| (name == "PORT").then(|| "eighty".to_string()));
        assert!(result.is_err());
    }
}
