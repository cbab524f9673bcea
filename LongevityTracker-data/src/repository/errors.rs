use thiserror::Error;
use crate::database::DatabaseError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No connection could be obtained from the pool
    #[error("Connection error: {0}")]
    Connection(String),

    /// A query failed on the server or mid-flight
    #[error("Query error: {0}")]
    Query(String),

    /// A row could not be decoded into its storage model
    #[error("Row conversion error: {0}")]
    Conversion(String),

    /// The blocking task running the queries did not complete
    #[error("Task error: {0}")]
    Task(String),
}

impl RepositoryError {
    /// True when the data store itself could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RepositoryError::Connection(_))
    }
}

impl From<r2d2::Error> for RepositoryError {
    fn from(error: r2d2::Error) -> Self {
        RepositoryError::Connection(error.to_string())
    }
}

impl From<mysql::Error> for RepositoryError {
    fn from(error: mysql::Error) -> Self {
        RepositoryError::Query(error.to_string())
    }
}

impl From<DatabaseError> for RepositoryError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::PoolError(e) => e.into(),
            DatabaseError::MySqlError(e) => e.into(),
            other => RepositoryError::Connection(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for RepositoryError {
    fn from(error: tokio::task::JoinError) -> Self {
        RepositoryError::Task(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_are_unavailable() {
        assert!(RepositoryError::Connection("refused".to_string()).is_unavailable());
        assert!(!RepositoryError::Query("no such view".to_string()).is_unavailable());
        assert!(!RepositoryError::Conversion("bad row".to_string()).is_unavailable());
        assert!(!RepositoryError::Task("panicked".to_string()).is_unavailable());
    }

    #[test]
    fn test_invalid_setting_maps_to_connection_error() {
        let error: RepositoryError = DatabaseError::InvalidSetting {
            name: "DB_PORT_LOCAL".to_string(),
            value: "x".to_string(),
        }
        .into();
        assert!(error.is_unavailable());
    }
}
