use serde::{Deserialize, Serialize};

/// A survey sequence number, passed through exactly as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurveySequence {
    /// Numeric sequence number
    Number(i64),
    /// Textual sequence number
    Text(String),
}

/// Latest recorded measurement of one biomarker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerMeasurement {
    /// Biomarker identifier, unique per biomarker type
    pub biomarker_id: i64,

    /// Human-readable biomarker name
    pub name: String,

    /// Measured value
    pub value: Option<f64>,

    /// Unit of measurement
    pub units: Option<String>,

    /// Day the measurement was taken, `YYYY-MM-DD` when the source held a date
    pub taken_at: Option<String>,
}

/// Demographic record of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub user_id: i64,

    /// Survey sequence number
    pub seqn: Option<SurveySequence>,

    /// Date of birth, `YYYY-MM-DD` when the source held a date
    pub birth_date: Option<String>,

    /// Sex
    pub sex: Option<String>,

    /// Race/ethnicity
    pub race_ethnicity: Option<String>,

    /// Current age as computed by the data store
    pub age: Option<i64>,
}

/// A user's profile together with their latest biomarker measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfileBundle {
    /// The user, absent when no such user exists
    pub user: Option<UserProfile>,

    /// Latest measurement per biomarker, ascending by biomarker id
    pub biomarkers: Vec<BiomarkerMeasurement>,
}
