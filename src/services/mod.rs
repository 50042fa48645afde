//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! the store capabilities and the HTTP handlers.

mod color_service;
mod user_service;

#[cfg(test)]
pub(crate) mod testing;

pub use color_service::ColorService;
pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since every store is behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub colors: ColorService,
    pub users: UserService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        let users = UserService::new(repos.users);
        Self {
            colors: ColorService::new(repos.colors, users.clone()),
            users,
        }
    }
}
