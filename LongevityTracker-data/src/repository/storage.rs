use mysql::prelude::Queryable;
use mysql::Row;
use tracing::debug;

use crate::models::profile::{LatestMeasurementRow, ProfileRows, UserWithAgeRow};
use super::errors::RepositoryError;

const LATEST_MEASUREMENTS_QUERY: &str = "
    SELECT
        BiomarkerID AS biomarkerId,
        BiomarkerName AS name,
        Value AS value,
        Units AS units,
        TakenAt AS takenAt
    FROM v_user_latest_measurements
    WHERE UserID = ?
    ORDER BY biomarkerId";

const USER_WITH_AGE_QUERY: &str = "
    SELECT
        UserID AS userId,
        SEQN AS seqn,
        BirthDate AS birthDate,
        Sex AS sex,
        RaceEthnicity AS raceEthnicity,
        Age AS age
    FROM v_user_with_age
    WHERE UserID = ?";

/// Database storage operations for the profile views
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Latest measurement per biomarker for a user, ascending by biomarker id
    pub fn latest_measurements<Q: Queryable>(
        conn: &mut Q,
        user_id: i64,
    ) -> Result<Vec<LatestMeasurementRow>, RepositoryError> {
        debug!("Querying latest measurements for user {}", user_id);

        let rows: Vec<Row> = conn.exec(LATEST_MEASUREMENTS_QUERY, (user_id,))?;
        rows.into_iter().map(LatestMeasurementRow::try_from).collect()
    }

    /// Demographic rows for a user; normally zero or one
    pub fn users_with_age<Q: Queryable>(
        conn: &mut Q,
        user_id: i64,
    ) -> Result<Vec<UserWithAgeRow>, RepositoryError> {
        debug!("Querying user with age for user {}", user_id);

        let rows: Vec<Row> = conn.exec(USER_WITH_AGE_QUERY, (user_id,))?;
        rows.into_iter().map(UserWithAgeRow::try_from).collect()
    }

    /// Run both profile queries on the same connection
    pub fn profile_rows<Q: Queryable>(conn: &mut Q, user_id: i64) -> Result<ProfileRows, RepositoryError> {
        let measurements = Self::latest_measurements(conn, user_id)?;
        let users = Self::users_with_age(conn, user_id)?;

        Ok(ProfileRows { measurements, users })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_filter_by_user_and_alias_columns() {
        assert!(LATEST_MEASUREMENTS_QUERY.contains("FROM v_user_latest_measurements"));
        assert!(LATEST_MEASUREMENTS_QUERY.contains("WHERE UserID = ?"));
        assert!(LATEST_MEASUREMENTS_QUERY.trim_end().ends_with("ORDER BY biomarkerId"));
        for alias in ["biomarkerId", "name", "value", "units", "takenAt"] {
            assert!(LATEST_MEASUREMENTS_QUERY.contains(&format!("AS {}", alias)));
        }

        assert!(USER_WITH_AGE_QUERY.contains("FROM v_user_with_age"));
        assert!(USER_WITH_AGE_QUERY.contains("WHERE UserID = ?"));
        for alias in ["userId", "seqn", "birthDate", "sex", "raceEthnicity", "age"] {
            assert!(USER_WITH_AGE_QUERY.contains(&format!("AS {}", alias)));
        }
    }
}
