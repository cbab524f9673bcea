// Domain entities and value objects
pub mod profile;
pub mod conversions;

// Re-export common types for easier imports
pub use profile::{BiomarkerMeasurement, SurveySequence, UserProfile, UserProfileBundle};
