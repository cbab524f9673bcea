use thiserror::Error;
use tracing::{debug, instrument, warn};
use async_trait::async_trait;

use longevity_tracker_data::database::DatabasePool;
use longevity_tracker_data::repository::{ProfileRepository, ProfileRepositoryTrait, RepositoryError};

use crate::entities::conversions;
use crate::entities::profile::UserProfileBundle;

/// Profile service errors
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// No connection to the data store could be established
    #[error("Data store unavailable: {0}")]
    DataStoreUnavailable(String),

    /// A query failed or returned rows that could not be read
    #[error("Query execution error: {0}")]
    QueryExecutionError(String),
}

impl From<RepositoryError> for ProfileServiceError {
    fn from(err: RepositoryError) -> Self {
        if err.is_unavailable() {
            ProfileServiceError::DataStoreUnavailable(err.to_string())
        } else {
            ProfileServiceError::QueryExecutionError(err.to_string())
        }
    }
}

/// Trait for profile service operations
#[async_trait]
pub trait ProfileServiceTrait {
    /// Get a user's demographic profile and latest biomarker measurements.
    ///
    /// An unknown user is not an error: the result has no user and no
    /// biomarkers.
    async fn get_user_profile(&self, user_id: i64) -> Result<UserProfileBundle, ProfileServiceError>;
}

/// Profile service for domain logic
pub struct ProfileService<R: ProfileRepositoryTrait> {
    repository: R,
}

impl<R: ProfileRepositoryTrait> ProfileService<R> {
    /// Create a new profile service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Borrow the underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: ProfileRepositoryTrait + Send + Sync> ProfileServiceTrait for ProfileService<R> {
    #[instrument(skip(self))]
    async fn get_user_profile(&self, user_id: i64) -> Result<UserProfileBundle, ProfileServiceError> {
        let rows = self.repository.get_profile_rows(user_id).await?;

        let biomarkers = rows.measurements
            .into_iter()
            .map(conversions::convert_to_domain_measurement)
            .collect::<Vec<_>>();

        // The view should hold one row per user; extra rows are ignored
        if rows.users.len() > 1 {
            warn!(
                "User view returned {} rows for user {}, using the first",
                rows.users.len(),
                user_id
            );
        }
        let user = rows.users
            .into_iter()
            .next()
            .map(conversions::convert_to_domain_user);

        debug!(
            "Built profile for user {} (found={}, biomarkers={})",
            user_id,
            user.is_some(),
            biomarkers.len()
        );

        Ok(UserProfileBundle { user, biomarkers })
    }
}

/// Create a profile service backed by the MySQL pool
pub fn create_profile_service(pool: DatabasePool) -> impl ProfileServiceTrait + Send + Sync {
    ProfileService::new(ProfileRepository::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use longevity_tracker_data::models::profile::{
        CalendarValue, LatestMeasurementRow, SequenceValue, UserWithAgeRow,
    };
    use longevity_tracker_data::repository::tests::{MockFailure, MockProfileRepository};

    use crate::entities::profile::SurveySequence;

    fn measurement(id: i64, name: &str, value: f64, units: &str, taken_at: Option<CalendarValue>) -> LatestMeasurementRow {
        LatestMeasurementRow {
            biomarker_id: id,
            name: name.to_string(),
            value: Some(value),
            units: Some(units.to_string()),
            taken_at,
        }
    }

    fn user(user_id: i64, seqn: &str, sex: &str) -> UserWithAgeRow {
        UserWithAgeRow {
            user_id,
            seqn: Some(SequenceValue::Text(seqn.to_string())),
            birth_date: Some(CalendarValue::Date(NaiveDate::from_ymd_opt(1980, 2, 15).unwrap())),
            sex: Some(sex.to_string()),
            race_ethnicity: Some("Asian".to_string()),
            age: Some(44),
        }
    }

    #[tokio::test]
    async fn test_unknown_user_yields_empty_profile() {
        let service = ProfileService::new(MockProfileRepository::new());

        let profile = service.get_user_profile(999).await.unwrap();
        assert_eq!(profile, UserProfileBundle::default());
        assert!(profile.user.is_none());
        assert!(profile.biomarkers.is_empty());
    }

    #[tokio::test]
    async fn test_profile_with_measurements_and_user() {
        let repo = MockProfileRepository::new()
            .with_measurement(42, measurement(
                1, "HbA1c", 5.4, "%",
                Some(CalendarValue::Date(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())),
            ))
            .with_measurement(42, measurement(5, "LDL", 110.0, "mg/dL", None))
            .with_user(user(42, "SEQN001", "F"));
        let service = ProfileService::new(repo);

        let profile = service.get_user_profile(42).await.unwrap();

        let user = profile.user.expect("user should be present");
        assert_eq!(user.user_id, 42);
        assert_eq!(user.seqn, Some(SurveySequence::Text("SEQN001".to_string())));
        assert_eq!(user.birth_date.as_deref(), Some("1980-02-15"));
        assert_eq!(user.age, Some(44));

        let ids: Vec<i64> = profile.biomarkers.iter().map(|b| b.biomarker_id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert_eq!(profile.biomarkers[0].taken_at.as_deref(), Some("2023-06-01"));
        assert_eq!(profile.biomarkers[1].taken_at, None);
    }

    #[tokio::test]
    async fn test_biomarkers_without_user_row() {
        let repo = MockProfileRepository::new()
            .with_measurement(3, measurement(2, "CRP", 0.8, "mg/L", None));
        let service = ProfileService::new(repo);

        let profile = service.get_user_profile(3).await.unwrap();
        assert!(profile.user.is_none());
        assert_eq!(profile.biomarkers.len(), 1);
    }

    #[tokio::test]
    async fn test_multiple_user_rows_takes_first() {
        let repo = MockProfileRepository::new()
            .with_user(user(7, "FIRST", "M"))
            .with_user(user(7, "SECOND", "F"));
        let service = ProfileService::new(repo);

        let profile = service.get_user_profile(7).await.unwrap();
        let user = profile.user.unwrap();
        assert_eq!(user.seqn, Some(SurveySequence::Text("FIRST".to_string())));
        assert_eq!(user.sex.as_deref(), Some("M"));
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_unavailable() {
        let service = ProfileService::new(
            MockProfileRepository::new().with_failure(MockFailure::Connection),
        );

        let err = service.get_user_profile(1).await.unwrap_err();
        assert!(matches!(err, ProfileServiceError::DataStoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_query_failure_maps_to_query_error() {
        let service = ProfileService::new(
            MockProfileRepository::new().with_failure(MockFailure::Query),
        );

        let err = service.get_user_profile(1).await.unwrap_err();
        assert!(matches!(err, ProfileServiceError::QueryExecutionError(_)));
        assert!(err.to_string().contains("doesn't exist"));
    }

    #[tokio::test]
    async fn test_each_call_reads_fresh_rows() {
        let service = ProfileService::new(MockProfileRepository::new());

        service.get_user_profile(1).await.unwrap();
        service.get_user_profile(1).await.unwrap();
        assert_eq!(service.repository().call_count(), 2);
    }
}
