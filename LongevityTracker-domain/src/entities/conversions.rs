use longevity_tracker_data::models::profile::{
    CalendarValue, LatestMeasurementRow, SequenceValue, UserWithAgeRow,
};

use crate::entities::profile::{BiomarkerMeasurement, SurveySequence, UserProfile};

// Conversion functions between data models and domain entities
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Format used for every calendar date leaving the service
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a calendar column for output.
///
/// Genuine dates become `YYYY-MM-DD`; text and null pass through untouched.
pub fn normalize_calendar_value(value: Option<CalendarValue>) -> Option<String> {
    value.map(|value| match value {
        CalendarValue::Date(date) => date.format(DATE_FORMAT).to_string(),
        CalendarValue::Text(text) => text,
    })
}

/// Convert from data model to domain entity for the survey sequence number
pub fn convert_to_domain_sequence(value: SequenceValue) -> SurveySequence {
    match value {
        SequenceValue::Number(n) => SurveySequence::Number(n),
        SequenceValue::Text(text) => SurveySequence::Text(text),
    }
}

/// Convert from data model to domain entity for a biomarker measurement
pub fn convert_to_domain_measurement(row: LatestMeasurementRow) -> BiomarkerMeasurement {
    BiomarkerMeasurement {
        biomarker_id: row.biomarker_id,
        name: row.name,
        value: row.value,
        units: row.units,
        taken_at: normalize_calendar_value(row.taken_at),
    }
}

/// Convert from data model to domain entity for a user profile
pub fn convert_to_domain_user(row: UserWithAgeRow) -> UserProfile {
    UserProfile {
        user_id: row.user_id,
        seqn: row.seqn.map(convert_to_domain_sequence),
        birth_date: normalize_calendar_value(row.birth_date),
        sex: row.sex,
        race_ethnicity: row.race_ethnicity,
        age: row.age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> CalendarValue {
        CalendarValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_dates_are_zero_padded() {
        assert_eq!(normalize_calendar_value(Some(date(2023, 6, 1))), Some("2023-06-01".to_string()));
        assert_eq!(normalize_calendar_value(Some(date(1980, 2, 15))), Some("1980-02-15".to_string()));
        assert_eq!(normalize_calendar_value(Some(date(999, 1, 9))), Some("0999-01-09".to_string()));
    }

    #[test]
    fn test_non_dates_pass_through() {
        assert_eq!(normalize_calendar_value(None), None);
        assert_eq!(
            normalize_calendar_value(Some(CalendarValue::Text("2023-06-01 (approx)".to_string()))),
            Some("2023-06-01 (approx)".to_string())
        );
        assert_eq!(
            normalize_calendar_value(Some(CalendarValue::Text(String::new()))),
            Some(String::new())
        );
    }

    #[test]
    fn test_convert_measurement() {
        let measurement = convert_to_domain_measurement(LatestMeasurementRow {
            biomarker_id: 1,
            name: "HbA1c".to_string(),
            value: Some(5.4),
            units: Some("%".to_string()),
            taken_at: Some(date(2023, 6, 1)),
        });

        assert_eq!(measurement.biomarker_id, 1);
        assert_eq!(measurement.name, "HbA1c");
        assert_eq!(measurement.value, Some(5.4));
        assert_eq!(measurement.units.as_deref(), Some("%"));
        assert_eq!(measurement.taken_at.as_deref(), Some("2023-06-01"));
    }

    #[test]
    fn test_convert_user() {
        let user = convert_to_domain_user(UserWithAgeRow {
            user_id: 42,
            seqn: Some(SequenceValue::Number(73557)),
            birth_date: None,
            sex: Some("M".to_string()),
            race_ethnicity: None,
            age: None,
        });

        assert_eq!(user.user_id, 42);
        assert_eq!(user.seqn, Some(SurveySequence::Number(73557)));
        assert_eq!(user.birth_date, None);
        assert_eq!(user.sex.as_deref(), Some("M"));
        assert_eq!(user.race_ethnicity, None);
        assert_eq!(user.age, None);
    }
}
