//! Repository layer for data access operations.
//!
//! Store capabilities are traits so the service layer can run against any
//! backend; the diesel_async implementations live next to them.

mod color_repo;
mod color_spec;
mod traits;
mod user_repo;

pub use color_repo::ColorRepository;
pub use color_spec::{ColorField, ColorFilter, ColorSpecification, like_pattern};
pub use traits::{ColorStore, UserStore};
pub use user_repo::UserRepository;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all stores for convenient access.
///
/// Cloning is cheap: every store is behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub colors: Arc<dyn ColorStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repositories {
    /// Creates the PostgreSQL-backed stores.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            colors: Arc::new(ColorRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }
}
