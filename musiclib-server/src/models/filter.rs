//! Song listing filter

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pagination::{Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use super::ValidationError;

/// Filter for `GET /songs`.
///
/// Every field is optional; an absent field places no constraint. Query
/// dates use ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFilter {
    /// Exact group match
    pub group: Option<String>,
    /// Exact title match
    pub title: Option<String>,
    /// Case-sensitive lyrics substring
    pub text: Option<String>,
    /// Inclusive lower bound on release date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on release date
    pub date_to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SongFilter {
    /// Fill page=1, page_size=10, but only when neither was supplied.
    pub fn with_default_pagination(mut self) -> Self {
        if self.page.is_none() && self.page_size.is_none() {
            self.page = Some(DEFAULT_PAGE);
            self.page_size = Some(DEFAULT_PAGE_SIZE);
        }
        self
    }

    /// Page and page size, when present, must be at least 1.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page == Some(0) {
            return Err(ValidationError::NotPositive { field: "page" });
        }
        if self.page_size == Some(0) {
            return Err(ValidationError::NotPositive { field: "page_size" });
        }
        Ok(())
    }

    /// LIMIT/OFFSET window, if both halves are set.
    pub fn pagination(&self) -> Option<Pagination> {
        Pagination::from_parts(self.page, self.page_size)
    }
}
