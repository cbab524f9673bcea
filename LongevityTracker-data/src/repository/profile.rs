use async_trait::async_trait;
use tracing::{debug, error};

use crate::database::DatabasePool;
use crate::models::profile::ProfileRows;
use super::errors::RepositoryError;
use super::storage::DatabaseStorage;

/// Repository trait for the profile views
#[async_trait]
pub trait ProfileRepositoryTrait {
    /// Read the latest measurements and the user row for one user.
    ///
    /// Both queries run on a single connection that is released before this
    /// returns, whatever the outcome.
    async fn get_profile_rows(&self, user_id: i64) -> Result<ProfileRows, RepositoryError>;

    /// Check that the data store answers queries
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Repository backed by the MySQL connection pool
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: DatabasePool,
}

impl ProfileRepository {
    /// Create a new repository over an existing pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    async fn get_profile_rows(&self, user_id: i64) -> Result<ProfileRows, RepositoryError> {
        let pool = self.pool.clone();

        // The connection lives inside the blocking task, so it is returned to
        // the pool when the task ends even if the caller has gone away.
        let rows = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            DatabaseStorage::profile_rows(&mut *conn, user_id)
        })
        .await?;

        match &rows {
            Ok(rows) => debug!(
                "Loaded {} measurement rows and {} user rows for user {}",
                rows.measurements.len(),
                rows.users.len(),
                user_id
            ),
            Err(e) => error!("Failed to load profile rows for user {}: {}", user_id, e),
        }

        rows
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || pool.ping()).await??;
        Ok(())
    }
}

/// Mock profile repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::models::profile::{LatestMeasurementRow, UserWithAgeRow};

    /// Failure the mock should report instead of returning rows
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockFailure {
        /// Behave as if no connection could be obtained
        Connection,
        /// Behave as if a query failed on the server
        Query,
    }

    /// Mock implementation of ProfileRepository for testing
    #[derive(Debug, Default)]
    pub struct MockProfileRepository {
        measurements: HashMap<i64, Vec<LatestMeasurementRow>>,
        users: HashMap<i64, Vec<UserWithAgeRow>>,
        failure: Option<MockFailure>,
        calls: AtomicUsize,
    }

    impl MockProfileRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a measurement row for a user.
        ///
        /// Rows are kept in insertion order; callers add them in the order
        /// the view would return them.
        pub fn with_measurement(mut self, user_id: i64, row: LatestMeasurementRow) -> Self {
            self.measurements.entry(user_id).or_default().push(row);
            self
        }

        /// Add a user row
        pub fn with_user(mut self, row: UserWithAgeRow) -> Self {
            self.users.entry(row.user_id).or_default().push(row);
            self
        }

        /// Make every call fail
        pub fn with_failure(mut self, failure: MockFailure) -> Self {
            self.failure = Some(failure);
            self
        }

        /// Number of profile lookups served so far
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn check_failure(&self) -> Result<(), RepositoryError> {
            match self.failure {
                Some(MockFailure::Connection) => Err(RepositoryError::Connection(
                    "mock is configured to refuse connections".to_string(),
                )),
                Some(MockFailure::Query) => Err(RepositoryError::Query(
                    "Table 'longevity.v_user_latest_measurements' doesn't exist".to_string(),
                )),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ProfileRepositoryTrait for MockProfileRepository {
        async fn get_profile_rows(&self, user_id: i64) -> Result<ProfileRows, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;

            Ok(ProfileRows {
                measurements: self.measurements.get(&user_id).cloned().unwrap_or_default(),
                users: self.users.get(&user_id).cloned().unwrap_or_default(),
            })
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            self.check_failure()
        }
    }

    #[tokio::test]
    async fn test_mock_returns_rows_for_known_user_only() {
        let repo = MockProfileRepository::new().with_measurement(
            7,
            LatestMeasurementRow {
                biomarker_id: 3,
                name: "Glucose".to_string(),
                value: Some(92.0),
                units: Some("mg/dL".to_string()),
                taken_at: None,
            },
        );

        let rows = repo.get_profile_rows(7).await.unwrap();
        assert_eq!(rows.measurements.len(), 1);
        assert!(rows.users.is_empty());

        let empty = repo.get_profile_rows(8).await.unwrap();
        assert_eq!(empty, ProfileRows::default());
        assert_eq!(repo.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let repo = MockProfileRepository::new().with_failure(MockFailure::Connection);
        let err = repo.get_profile_rows(1).await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(repo.ping().await.is_err());

        let repo = MockProfileRepository::new().with_failure(MockFailure::Query);
        let err = repo.get_profile_rows(1).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }
}
