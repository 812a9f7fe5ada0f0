//! Page windows over ordered result sets

use serde::Deserialize;

/// Questions shown per page
pub const QUESTIONS_PER_PAGE: u32 = 10;

/// A 1-indexed page of a result set.
///
/// Page 0 is what a zero or negative `?page=` parses to. It always
/// selects an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed, 0 = empty)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// Page `page` with the standard question page size.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            per_page: QUESTIONS_PER_PAGE,
        }
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.per_page as usize)
    }

    /// Slice this page's window out of an ordered collection.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        if self.page == 0 {
            return Vec::new();
        }

        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.per_page as usize).min(items.len());
        items[start..end].to_vec()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Query parameters for pagination (`?page=N`)
///
/// Kept as a raw string so that a non-numeric value falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl From<PageParams> for Pagination {
    fn from(params: PageParams) -> Self {
        let page = match params.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
                Ok(_) => 0,
                Err(_) => 1,
            },
        };
        Self::new(page)
    }
}
