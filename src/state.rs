//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool, used by health checks
    pub db_pool: AsyncDbPool,
    /// JWT configuration for token generation and validation
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Creates a new AppState backed by the diesel repositories.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, settings.jwt.clone());
    /// ```
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        let services = Services::new(Repositories::new(pool.clone()));
        Self::with_services(services, pool, jwt_config)
    }

    /// Creates an AppState around already constructed services.
    pub fn with_services(services: Services, db_pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        Self {
            services,
            db_pool,
            jwt_config,
        }
    }
}
