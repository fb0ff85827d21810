use serde::{Deserialize, Serialize};

use super::Sort;
use crate::common::{DatabaseError, DatabaseResult};

/// Default page size applied by [`PageRequest::of`]. Callers that need a
/// different default pass an explicit size through [`PageRequest::new`].
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// A request for one slice of a (possibly sorted) result set.
///
/// `page` is zero-based; `size` must be positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    /// Page request with the default page size
    pub fn of(page: u64) -> Self {
        Self::new(page, DEFAULT_PAGE_SIZE)
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub(crate) fn validate(&self) -> DatabaseResult<()> {
        if self.size == 0 {
            return Err(DatabaseError::Validation(
                "page size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One page of content plus totals.
///
/// `total_elements` is a best-effort count: under concurrent writers it may
/// be stale by the time the content is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Build a page; `size` must be positive (the page request is validated
    /// before any query runs).
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Convert the content while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
