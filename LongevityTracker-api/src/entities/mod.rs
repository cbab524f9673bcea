// Public entities for the Longevity Tracker API
// This module contains data structures that are shared across the application boundary

// Profile response entities
pub mod profile;

// Common entities for error handling
pub mod common;
