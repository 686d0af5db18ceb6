//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Service container holding all application services
    pub services: Arc<dyn ServiceContainer>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
    ) -> Self {
        let services = Arc::new(Services::from_connection(database.get_connection(), config));

        Self {
            services,
            cache,
            database,
        }
    }

    /// Create application state with a manually injected container.
    ///
    /// Used by tests to substitute a mock container.
    pub fn new(
        services: Arc<dyn ServiceContainer>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            services,
            cache,
            database,
        }
    }
}
