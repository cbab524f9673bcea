// Storage models for rows read from the profile views
pub mod profile;

pub use profile::{CalendarValue, LatestMeasurementRow, ProfileRows, SequenceValue, UserWithAgeRow};
