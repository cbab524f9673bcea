//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;
use async_trait::async_trait;
use tracing::warn;

use longevity_tracker_data::database::DatabasePool;
use longevity_tracker_data::repository::{ProfileRepository, ProfileRepositoryTrait};

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Build a report whose overall status is the worst component status
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the database
    /// Returns an error describing the failure when the database cannot be queried
    async fn check_database_status(&self) -> Result<(), String>;
}

/// Health service that probes the data store through the profile repository
#[derive(Debug)]
pub struct HealthService<R> {
    repository: R,
}

impl<R: ProfileRepositoryTrait> HealthService<R> {
    /// Create a new health service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> HealthServiceTrait for HealthService<R>
where
    R: ProfileRepositoryTrait + Send + Sync + std::fmt::Debug,
{
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        let database = match self.check_database_status().await {
            Ok(()) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(e),
                }
            }
        };
        components.insert("database".to_string(), database);

        // The API answering this request is evidence enough
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
        self.repository
            .ping()
            .await
            .map_err(|e| format!("Database connection failed: {}", e))
    }
}

/// Create a health service backed by the MySQL pool
pub fn create_health_service(pool: DatabasePool) -> impl HealthServiceTrait {
    HealthService::new(ProfileRepository::new(pool))
}
