//! Pagination for song listings

/// Default page when a listing carries no pagination at all
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when a listing carries no pagination at all
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Resolved LIMIT/OFFSET window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub page_size: u32,
}

impl Pagination {
    /// Build a window only when both halves are present.
    ///
    /// A lone `page` or lone `page_size` yields `None`: the listing is then
    /// returned unbounded. Callers rely on this; do not default the missing half.
    pub fn from_parts(page: Option<u32>, page_size: Option<u32>) -> Option<Self> {
        match (page, page_size) {
            (Some(page), Some(page_size)) => Some(Self { page, page_size }),
            _ => None,
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page.max(1)) - 1) * i64::from(self.page_size)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
