// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use longevity_tracker_data::repository::tests::{MockFailure, MockProfileRepository};

use std::collections::HashMap;
use async_trait::async_trait;

use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::profile::{ProfileService, ProfileServiceTrait};

/// Mock implementation of the HealthServiceTrait for testing
#[derive(Debug)]
pub struct MockHealthService {
    database_status: ComponentStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a mock health service that reports everything as healthy
    pub fn new() -> Self {
        Self {
            database_status: ComponentStatus::Healthy,
        }
    }

    /// Configure the database status the mock will report
    pub fn with_database_status(mut self, status: ComponentStatus) -> Self {
        self.database_status = status;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();
        components.insert(
            "database".to_string(),
            HealthComponent {
                status: self.database_status.clone(),
                details: match self.database_status {
                    ComponentStatus::Healthy => None,
                    _ => Some("Mock database status".to_string()),
                },
            },
        );
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        SystemHealth::from_components(components)
    }

    async fn check_database_status(&self) -> Result<(), String> {
        match self.database_status {
            ComponentStatus::Unhealthy => Err("Mock database is down".to_string()),
            _ => Ok(()),
        }
    }
}

/// Create a profile service over a mock repository
pub fn create_mock_profile_service(repository: MockProfileRepository) -> impl ProfileServiceTrait + Send + Sync {
    ProfileService::new(repository)
}
