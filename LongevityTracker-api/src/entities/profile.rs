use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use longevity_tracker_domain::entities::profile::{
    BiomarkerMeasurement, SurveySequence, UserProfile, UserProfileBundle,
};

/// Largest magnitude at which every integer is exactly representable in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize integral measurement values as JSON integers (`110`, not `110.0`)
fn serialize_measurement_value<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_i64(*v as i64)
        }
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

/// Public representation of a biomarker's latest measurement
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicBiomarkerMeasurement {
    /// Biomarker identifier
    #[schema(example = 1)]
    pub biomarker_id: i64,

    /// Biomarker name
    #[schema(example = "HbA1c")]
    pub name: String,

    /// Measured value
    #[serde(serialize_with = "serialize_measurement_value")]
    #[schema(value_type = Option<f64>, example = 5.4)]
    pub value: Option<f64>,

    /// Unit of measurement
    #[schema(example = "%")]
    pub units: Option<String>,

    /// Day of measurement (YYYY-MM-DD)
    #[schema(example = "2023-06-01")]
    pub taken_at: Option<String>,
}

/// Public representation of a user's demographic profile
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserProfile {
    /// User identifier
    #[schema(example = 42)]
    pub user_id: i64,

    /// Survey sequence number (number or string, as stored)
    #[schema(value_type = Option<String>, example = "SEQN001")]
    pub seqn: Option<SurveySequence>,

    /// Date of birth (YYYY-MM-DD)
    #[schema(example = "1980-02-15")]
    pub birth_date: Option<String>,

    /// Sex
    #[schema(example = "F")]
    pub sex: Option<String>,

    /// Race/ethnicity
    #[schema(example = "Asian")]
    pub race_ethnicity: Option<String>,

    /// Current age in years
    #[schema(example = 44)]
    pub age: Option<i64>,
}

/// Profile response: the user (or null) and their latest biomarkers
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// The user, null when no such user exists
    pub user: Option<PublicUserProfile>,

    /// Latest measurement per biomarker, ascending by biomarkerId
    pub biomarkers: Vec<PublicBiomarkerMeasurement>,
}

impl From<BiomarkerMeasurement> for PublicBiomarkerMeasurement {
    fn from(measurement: BiomarkerMeasurement) -> Self {
        Self {
            biomarker_id: measurement.biomarker_id,
            name: measurement.name,
            value: measurement.value,
            units: measurement.units,
            taken_at: measurement.taken_at,
        }
    }
}

impl From<UserProfile> for PublicUserProfile {
    fn from(user: UserProfile) -> Self {
        Self {
            user_id: user.user_id,
            seqn: user.seqn,
            birth_date: user.birth_date,
            sex: user.sex,
            race_ethnicity: user.race_ethnicity,
            age: user.age,
        }
    }
}

impl From<UserProfileBundle> for ProfileResponse {
    fn from(bundle: UserProfileBundle) -> Self {
        Self {
            user: bundle.user.map(PublicUserProfile::from),
            biomarkers: bundle.biomarkers.into_iter().map(PublicBiomarkerMeasurement::from).collect(),
        }
    }
}
