use chrono::NaiveDate;
use mysql::prelude::FromValue;
use mysql::{Row, Value};
use serde::{Deserialize, Serialize};

use crate::repository::RepositoryError;

/// A date-ish column as it came off the wire.
///
/// `DATE` columns decoded by the binary protocol arrive as real dates; the
/// text protocol (or a view that casts to `VARCHAR`) hands back strings,
/// which are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarValue {
    /// A genuine calendar date
    Date(NaiveDate),
    /// Anything that was not date-typed at the source
    Text(String),
}

impl CalendarValue {
    /// Decode a MySQL value, `NULL` becoming `None`
    pub fn from_sql(column: &str, value: Value) -> Result<Option<Self>, RepositoryError> {
        match value {
            Value::NULL => Ok(None),
            Value::Date(year, month, day, ..) => {
                match NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32) {
                    Some(date) => Ok(Some(CalendarValue::Date(date))),
                    // MySQL zero dates ("0000-00-00") have no chrono equivalent
                    None => Ok(Some(CalendarValue::Text(format!("{:04}-{:02}-{:02}", year, month, day)))),
                }
            }
            Value::Bytes(bytes) => String::from_utf8(bytes)
                .map(|text| Some(CalendarValue::Text(text)))
                .map_err(|_| RepositoryError::Conversion(format!("{} is not valid UTF-8", column))),
            other => Err(RepositoryError::Conversion(format!(
                "{} has unexpected type: {:?}",
                column, other
            ))),
        }
    }
}

/// The survey sequence number, which the schema may store as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceValue {
    /// Numeric sequence number
    Number(i64),
    /// Textual sequence number
    Text(String),
}

impl SequenceValue {
    /// Decode a MySQL value, `NULL` becoming `None`
    pub fn from_sql(column: &str, value: Value) -> Result<Option<Self>, RepositoryError> {
        match value {
            Value::NULL => Ok(None),
            Value::Int(n) => Ok(Some(SequenceValue::Number(n))),
            Value::UInt(n) => i64::try_from(n)
                .map(|n| Some(SequenceValue::Number(n)))
                .map_err(|_| RepositoryError::Conversion(format!("{} is out of range: {}", column, n))),
            Value::Bytes(bytes) => String::from_utf8(bytes)
                .map(|text| Some(SequenceValue::Text(text)))
                .map_err(|_| RepositoryError::Conversion(format!("{} is not valid UTF-8", column))),
            other => Err(RepositoryError::Conversion(format!(
                "{} has unexpected type: {:?}",
                column, other
            ))),
        }
    }
}

/// Decode a measured value, `NULL` becoming `None`.
///
/// `FLOAT` columns arrive as `f32` over the binary protocol; they go through
/// their shortest decimal form so a stored 5.4 reads back as 5.4.
pub fn measurement_value_from_sql(column: &str, value: Value) -> Result<Option<f64>, RepositoryError> {
    match value {
        Value::NULL => Ok(None),
        Value::Float(f) => f
            .to_string()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| RepositoryError::Conversion(format!("{}: {}", column, e))),
        Value::Double(d) => Ok(Some(d)),
        other => <f64 as FromValue>::from_value_opt(other)
            .map(Some)
            .map_err(|e| RepositoryError::Conversion(format!("{}: {}", column, e))),
    }
}

/// Storage model for one row of `v_user_latest_measurements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestMeasurementRow {
    /// Biomarker identifier
    pub biomarker_id: i64,

    /// Biomarker display name
    pub name: String,

    /// Measured value
    pub value: Option<f64>,

    /// Unit of measurement
    pub units: Option<String>,

    /// When the measurement was taken
    pub taken_at: Option<CalendarValue>,
}

/// Storage model for one row of `v_user_with_age`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithAgeRow {
    /// User identifier
    pub user_id: i64,

    /// Survey sequence number
    pub seqn: Option<SequenceValue>,

    /// Date of birth
    pub birth_date: Option<CalendarValue>,

    /// Sex as recorded by the survey
    pub sex: Option<String>,

    /// Race/ethnicity as recorded by the survey
    pub race_ethnicity: Option<String>,

    /// Age computed by the view
    pub age: Option<i64>,
}

/// Everything one profile lookup reads, in query order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRows {
    /// Rows of the latest-measurements query, ascending by biomarker id
    pub measurements: Vec<LatestMeasurementRow>,

    /// Rows of the user query; normally zero or one
    pub users: Vec<UserWithAgeRow>,
}

fn take_value(row: &mut Row, column: &str) -> Result<Value, RepositoryError> {
    row.take::<Value, _>(column)
        .ok_or_else(|| RepositoryError::Conversion(format!("missing column {}", column)))
}

fn take_column<T>(row: &mut Row, column: &str) -> Result<T, RepositoryError>
where
    T: FromValue,
{
    match row.take_opt::<T, _>(column) {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(RepositoryError::Conversion(format!("{}: {}", column, e))),
        None => Err(RepositoryError::Conversion(format!("missing column {}", column))),
    }
}

impl TryFrom<Row> for LatestMeasurementRow {
    type Error = RepositoryError;

    fn try_from(mut row: Row) -> Result<Self, Self::Error> {
        Ok(Self {
            biomarker_id: take_column(&mut row, "biomarkerId")?,
            name: take_column(&mut row, "name")?,
            value: measurement_value_from_sql("value", take_value(&mut row, "value")?)?,
            units: take_column(&mut row, "units")?,
            taken_at: CalendarValue::from_sql("takenAt", take_value(&mut row, "takenAt")?)?,
        })
    }
}

impl TryFrom<Row> for UserWithAgeRow {
    type Error = RepositoryError;

    fn try_from(mut row: Row) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: take_column(&mut row, "userId")?,
            seqn: SequenceValue::from_sql("seqn", take_value(&mut row, "seqn")?)?,
            birth_date: CalendarValue::from_sql("birthDate", take_value(&mut row, "birthDate")?)?,
            sex: take_column(&mut row, "sex")?,
            race_ethnicity: take_column(&mut row, "raceEthnicity")?,
            age: take_column(&mut row, "age")?,
        })
    }
}
