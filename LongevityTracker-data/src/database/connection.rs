//! Database connection module for the Longevity Tracker
//!
//! This module owns the MySQL connection pool. Configuration is read once at
//! startup into a [`DatabaseConfig`] and handed to [`DatabasePool::connect`];
//! nothing here reads the environment on the request path.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use mysql::prelude::Queryable;
use r2d2_mysql::mysql::OptsBuilder;
use r2d2_mysql::MySqlConnectionManager;
use thiserror::Error;
use tracing::{debug, info};

/// A connection checked out of the pool. It goes back to the pool when dropped.
pub type PooledConnection = r2d2::PooledConnection<MySqlConnectionManager>;

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A configuration value could not be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidSetting {
        /// Environment variable name
        name: String,
        /// The raw value that failed to parse
        value: String,
    },

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    /// MySQL error
    #[error("MySQL error: {0}")]
    MySqlError(#[from] mysql::Error),
}

/// Parse an optional setting, falling back to `default` when it is absent.
///
/// A present but unparseable value is an error rather than a silent fallback.
pub fn parse_setting<T, F>(lookup: &F, name: &str, default: T) -> Result<T, DatabaseError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| DatabaseError::InvalidSetting {
            name: name.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Database configuration
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// MySQL host name or IP address
    pub host: String,
    /// MySQL TCP port
    pub port: u16,
    /// MySQL user
    pub user: String,
    /// MySQL password
    pub password: String,
    /// Database (schema) holding the profile views
    pub database: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long a request waits for a connection, in seconds
    pub timeout_seconds: u64,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3307,
            user: "biomarker_user".to_string(),
            password: "biomarker_pass".to_string(),
            database: "longevity".to_string(),
            max_connections: 10,
            timeout_seconds: 5,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary key lookup, using defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            host: lookup("DB_HOST_LOCAL").unwrap_or(defaults.host),
            port: parse_setting(&lookup, "DB_PORT_LOCAL", defaults.port)?,
            user: lookup("MYSQL_USER").unwrap_or(defaults.user),
            password: lookup("MYSQL_PASSWORD").unwrap_or(defaults.password),
            database: lookup("MYSQL_DATABASE").unwrap_or(defaults.database),
            max_connections: parse_setting(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            timeout_seconds: parse_setting(&lookup, "DB_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
        };

        info!(
            "Database configuration: host={}, port={}, database={}, max_connections={}, timeout={}s",
            config.host, config.port, config.database, config.max_connections, config.timeout_seconds
        );

        Ok(config)
    }

    /// Connection checkout timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn opts(&self) -> OptsBuilder {
        OptsBuilder::new()
            .ip_or_hostname(Some(self.host.clone()))
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()))
            .tcp_connect_timeout(Some(self.timeout()))
    }
}

/// MySQL connection pool shared by all requests
#[derive(Clone)]
pub struct DatabasePool {
    pool: r2d2::Pool<MySqlConnectionManager>,
}

impl fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.pool.state();
        f.debug_struct("DatabasePool")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

impl DatabasePool {
    /// Create the pool without waiting for the server.
    ///
    /// The server may be down at startup; requests then fail with a
    /// connection error until it comes back.
    pub fn connect(config: &DatabaseConfig) -> Self {
        info!(
            "Initializing MySQL connection pool for {}:{}/{}",
            config.host, config.port, config.database
        );

        let manager = MySqlConnectionManager::new(config.opts());
        let pool = r2d2::Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(0))
            .connection_timeout(config.timeout())
            .build_unchecked(manager);

        Self { pool }
    }

    /// Check a connection out of the pool
    pub fn get_connection(&self) -> Result<PooledConnection, r2d2::Error> {
        let conn = self.pool.get()?;
        debug!("Checked out database connection");
        Ok(conn)
    }

    /// Round-trip a trivial query to confirm the server is reachable
    pub fn ping(&self) -> Result<(), DatabaseError> {
        let mut conn = self.get_connection()?;
        conn.query_drop("SELECT 1")?;
        Ok(())
    }
}
