pub mod profile;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use profile::{create_profile_service, ProfileService, ProfileServiceError, ProfileServiceTrait};
