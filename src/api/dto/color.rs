//! Color request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Color, NewColor, Page};

/// Payload for creating a color.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PostColorRequest {
    /// Display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(example = "Crimson", max_length = 255)]
    pub name: Option<String>,
    /// Hex code, unique across all colors
    #[validate(length(min = 1, max = 32, message = "Hex must be between 1 and 32 characters"))]
    #[schema(example = "dc143c", min_length = 1, max_length = 32)]
    pub hex: String,
    #[validate(length(max = 1500, message = "Description must be at most 1500 characters"))]
    #[schema(example = "A strong, deep red", max_length = 1500)]
    pub description: Option<String>,
}

impl PostColorRequest {
    /// Maps the payload onto an insertable color owned by `author_id`.
    pub fn into_new_color(self, author_id: Option<i32>) -> NewColor {
        NewColor {
            name: self.name,
            description: self.description,
            hex: self.hex,
            author_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ColorResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Crimson")]
    pub name: Option<String>,
    #[schema(example = "A strong, deep red")]
    pub description: Option<String>,
    #[schema(example = "dc143c")]
    pub hex: String,
    #[schema(example = 1)]
    pub author_id: Option<i32>,
}

impl From<Color> for ColorResponse {
    fn from(color: Color) -> Self {
        Self {
            id: color.id,
            name: color.name,
            description: color.description,
            hex: color.hex,
            author_id: color.author_id,
        }
    }
}

/// Query parameters for listing colors.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ColorListParams {
    /// Page number (0-based)
    #[serde(default)]
    #[validate(range(min = 0, message = "Page must not be negative"))]
    #[param(minimum = 0, example = 0)]
    pub page: i64,

    /// Number of items per page (max 100)
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "Size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub size: i64,

    /// Sort field: id, name, hex or description
    #[serde(default = "default_sort")]
    #[param(example = "id")]
    pub sort: String,

    /// Case-insensitive substring of the name or hex
    #[serde(default)]
    #[param(example = "red")]
    pub filter: String,

    /// Username of the author
    #[serde(default)]
    pub author: String,
}

fn default_size() -> i64 {
    20
}

fn default_sort() -> String {
    "id".to_string()
}

/// One page of results plus paging metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    /// Current page number (0-based)
    #[schema(example = 0)]
    pub page: i64,
    #[schema(example = 20)]
    pub size: i64,
    #[schema(example = 3)]
    pub total_elements: i64,
    #[schema(example = 1)]
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T, U: From<T>> From<Page<T>> for PageResponse<U> {
    fn from(page: Page<T>) -> Self {
        let page = page.map(U::from);
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        Self {
            content: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            has_next,
            has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageRequest, SortField};

    #[test]
    fn test_into_new_color_copies_fields() {
        let request = PostColorRequest {
            name: Some("Red".to_string()),
            hex: "ff0000".to_string(),
            description: Some("primary".to_string()),
        };

        let new_color = request.into_new_color(Some(7));
        assert_eq!(
            new_color,
            NewColor {
                name: Some("Red".to_string()),
                description: Some("primary".to_string()),
                hex: "ff0000".to_string(),
                author_id: Some(7),
            }
        );
    }

    #[test]
    fn test_post_color_validation() {
        let empty_hex = PostColorRequest {
            name: None,
            hex: String::new(),
            description: None,
        };
        assert!(empty_hex.validate().is_err());

        let long_description = PostColorRequest {
            name: None,
            hex: "ff0000".to_string(),
            description: Some("x".repeat(1501)),
        };
        let errors = long_description.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_list_params_defaults() {
        let params: ColorListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 0);
        assert_eq!(params.size, 20);
        assert_eq!(params.sort, "id");
        assert!(params.filter.is_empty());
        assert!(params.author.is_empty());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_list_params_size_is_capped() {
        let params: ColorListParams = serde_json::from_str(r#"{"size": 101}"#).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_page_response_from_page() {
        let request = PageRequest::new(0, 2, SortField::Id).unwrap();
        let color = Color {
            id: 1,
            name: Some("Red".to_string()),
            description: None,
            hex: "ff0000".to_string(),
            author_id: None,
        };
        let page = Page::new(vec![color], &request, 3);

        let response: PageResponse<ColorResponse> = page.into();
        assert_eq!(response.content[0].hex, "ff0000");
        assert_eq!(response.total_pages, 2);
        assert!(response.has_next);
        assert!(!response.has_previous);
    }
}
