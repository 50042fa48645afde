//! Store capabilities consumed by the service layer.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Color, NewColor, NewUser, Page, PageRequest, User};
use crate::repositories::ColorSpecification;

/// Persistence capability for colors.
///
/// All lookups are exact matches; absence is `Ok(None)`, never an error.
#[async_trait]
pub trait ColorStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Color>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Color>>;

    async fn find_by_hex(&self, hex: &str) -> AppResult<Option<Color>>;

    /// Returns the page of colors satisfying `spec`, ordered by the
    /// requested sort field and then by id. `total_elements` counts every
    /// matching row, not just the page.
    async fn find_page(
        &self,
        spec: &ColorSpecification,
        page_request: &PageRequest,
    ) -> AppResult<Page<Color>>;

    /// Inserts a color and returns it with its generated id.
    ///
    /// A second color with the same hex fails with `AppError::Duplicate`.
    async fn save(&self, new_color: NewColor) -> AppResult<Color>;

    /// Deletes by id and returns the number of removed rows (0 or 1).
    async fn delete(&self, id: i32) -> AppResult<usize>;
}

/// Persistence capability for users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn create(&self, new_user: NewUser) -> AppResult<User>;
}
