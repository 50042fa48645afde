//! Color service: lookups, filtered listings and creation.
//!
//! Business rules live here; the stores only persist. Domain failures are
//! reported as [`ColorError`] inside [`AppError::Color`] and are never
//! rewritten on the way out.

use std::sync::Arc;

use crate::error::{AppError, AppResult, ColorError, ColorKey};
use crate::models::{Color, NewColor, Page, PageRequest, SortField};
use crate::repositories::{ColorSpecification, ColorStore};
use crate::services::UserService;

/// Color service for handling color-related business logic.
///
/// Cloning is cheap: the color store is shared behind `Arc` and author
/// filters are resolved through [`UserService`].
#[derive(Clone)]
pub struct ColorService {
    colors: Arc<dyn ColorStore>,
    users: UserService,
}

impl ColorService {
    pub fn new(colors: Arc<dyn ColorStore>, users: UserService) -> Self {
        Self { colors, users }
    }

    /// Gets a color by its id.
    ///
    /// # Returns
    /// The color, or `ColorError::NotFound` keyed by the id
    pub async fn get_color_by_id(&self, id: i32) -> AppResult<Color> {
        tracing::debug!(id, "Looking up color by id");
        self.colors
            .find_by_id(id)
            .await?
            .ok_or_else(|| ColorError::not_found(ColorKey::Id(id)).into())
    }

    /// Gets a color by its exact, case-sensitive name.
    pub async fn get_color_by_name(&self, name: &str) -> AppResult<Color> {
        tracing::debug!(name, "Looking up color by name");
        self.colors
            .find_by_name(name)
            .await?
            .ok_or_else(|| ColorError::not_found(ColorKey::Name(name.to_string())).into())
    }

    /// Gets a color by its exact hex code.
    pub async fn get_color_by_hex(&self, hex: &str) -> AppResult<Color> {
        tracing::debug!(hex, "Looking up color by hex");
        self.colors
            .find_by_hex(hex)
            .await?
            .ok_or_else(|| ColorError::not_found(ColorKey::Hex(hex.to_string())).into())
    }

    /// Lists one page of colors.
    ///
    /// # Arguments
    /// * `page` - Zero-based page index, must not be negative
    /// * `size` - Page size, at least 1
    /// * `sort_field` - One of `id`, `name`, `hex`, `description`
    /// * `filter` - Case-insensitive substring of name or hex; blank matches all
    /// * `author_filter` - Username of the author; blank means any author
    ///
    /// An author that does not exist yields an empty page rather than an
    /// error.
    pub async fn get_colors(
        &self,
        page: i64,
        size: i64,
        sort_field: &str,
        filter: &str,
        author_filter: &str,
    ) -> AppResult<Page<Color>> {
        let sort = sort_field.parse::<SortField>()?;
        let page_request = PageRequest::new(page, size, sort)?;

        let mut spec = ColorSpecification::new(filter);

        let author = author_filter.trim();
        if !author.is_empty() {
            match self.users.find_by_username(author).await? {
                Some(user) => spec = spec.and(ColorSpecification::author_is(user.id)),
                None => {
                    tracing::debug!(author, "Unknown author filter, returning empty page");
                    return Ok(Page::empty(&page_request));
                }
            }
        }

        tracing::debug!(page, size, sort = %sort, ?spec, "Listing colors");
        self.colors.find_page(&spec, &page_request).await
    }

    /// Persists a new color.
    ///
    /// Fails with `ColorError::AlreadyExists` when the hex is taken, whether
    /// that is seen by the lookup or by the store's unique constraint after
    /// a concurrent insert.
    pub async fn post_color(&self, new_color: NewColor) -> AppResult<Color> {
        if self.colors.find_by_hex(&new_color.hex).await?.is_some() {
            tracing::warn!(hex = %new_color.hex, "Rejected duplicate color");
            return Err(ColorError::already_exists(new_color.hex).into());
        }

        let hex = new_color.hex.clone();
        match self.colors.save(new_color).await {
            Ok(color) => {
                tracing::info!(id = color.id, hex = %color.hex, "Created color");
                Ok(color)
            }
            Err(AppError::Duplicate { field, .. }) if field == "hex" => {
                tracing::warn!(hex = %hex, "Lost insert race for color hex");
                Err(ColorError::already_exists(hex).into())
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a color by id.
    pub async fn delete_color(&self, id: i32) -> AppResult<()> {
        let affected = self.colors.delete(id).await?;
        if affected == 0 {
            return Err(ColorError::not_found(ColorKey::Id(id)).into());
        }
        tracing::info!(id, "Deleted color");
        Ok(())
    }
}
