//! Pagination and ordering types shared by stores and services.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

/// Column a color listing can be ordered by.
///
/// Ordering is always ascending and ties are broken on `id`, so a listing
/// is deterministic for any sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Hex,
    Description,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Id,
        SortField::Name,
        SortField::Hex,
        SortField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Hex => "hex",
            SortField::Description => "description",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AppError::BadRequest {
                message: format!(
                    "Unknown sort field '{}'. Valid fields are: id, name, hex, description",
                    s
                ),
            })
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: SortField,
}

impl PageRequest {
    /// Builds a page request, rejecting `page < 0` and `size < 1`.
    pub fn new(page: i64, size: i64, sort: SortField) -> Result<Self, AppError> {
        if page < 0 {
            return Err(AppError::Validation {
                field: "page".to_string(),
                reason: "Page index must not be negative".to_string(),
            });
        }
        if size < 1 {
            return Err(AppError::Validation {
                field: "size".to_string(),
                reason: "Page size must be at least 1".to_string(),
            });
        }
        Ok(Self { page, size, sort })
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// A bounded, ordered slice of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn total_pages(&self) -> i64 {
        if self.size <= 0 || self.total_elements <= 0 {
            return 0;
        }
        let full = self.total_elements / self.size;
        if self.total_elements % self.size == 0 {
            full
        } else {
            full + 1
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages() - 1
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_parse() {
        assert_eq!("id".parse::<SortField>().unwrap(), SortField::Id);
        assert_eq!("hex".parse::<SortField>().unwrap(), SortField::Hex);
        assert_eq!(
            "description".parse::<SortField>().unwrap(),
            SortField::Description
        );
    }

    #[test]
    fn test_sort_field_rejects_unknown_column() {
        let err = "author".parse::<SortField>().unwrap_err();
        assert!(matches!(err, AppError::BadRequest { message } if message.contains("author")));
    }

    #[test]
    fn test_page_request_bounds() {
        assert!(PageRequest::new(0, 1, SortField::Id).is_ok());
        assert!(matches!(
            PageRequest::new(-1, 10, SortField::Id),
            Err(AppError::Validation { field, .. }) if field == "page"
        ));
        assert!(matches!(
            PageRequest::new(0, 0, SortField::Id),
            Err(AppError::Validation { field, .. }) if field == "size"
        ));
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(3, 20, SortField::Name).unwrap();
        assert_eq!(request.offset(), 60);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::new(1, 10, SortField::Id).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 23);

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = Page::new(vec![1], &PageRequest::new(2, 10, SortField::Id).unwrap(), 21);
        assert!(!last.has_next());
    }

    #[test]
    fn test_page_metadata_with_max_size() {
        let request = PageRequest::new(0, i64::MAX, SortField::Id).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 3);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());

        let far = PageRequest::new(i64::MAX, i64::MAX, SortField::Id).unwrap();
        assert_eq!(far.offset(), i64::MAX);
        assert!(!Page::new(Vec::<i32>::new(), &far, 3).has_next());
    }

    #[test]
    fn test_empty_page() {
        let request = PageRequest::new(0, 10, SortField::Id).unwrap();
        let page: Page<i32> = Page::empty(&request);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }
}
