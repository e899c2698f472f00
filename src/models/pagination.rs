//! Pagination primitives shared across all list endpoints.
//!
//! Unlike a database-backed LIMIT/OFFSET, paging here slices an
//! already-filtered in-memory collection.

use serde::{Deserialize, Serialize};

/// Pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_PER_PAGE: usize = 100;

    /// Default items per page.
    const DEFAULT_PER_PAGE: usize = 25;

    pub fn limit(&self) -> usize {
        self.per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    pub fn offset(&self) -> usize {
        (self.current_page() - 1) * self.limit()
    }

    pub fn current_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// The current page of an in-memory collection. Out-of-range pages
    /// yield an empty slice, not an error.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.limit()).min(items.len());
        &items[start..end]
    }
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: usize, pagination: &Pagination) -> Self {
        let per_page = pagination.limit();
        let total_pages = total.div_ceil(per_page);
        Self {
            items,
            total,
            page: pagination.current_page(),
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 25);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn pagination_clamps_per_page() {
        let p = Pagination {
            page: Some(1),
            per_page: Some(500),
        };
        assert_eq!(p.limit(), 100);
    }

    #[test]
    fn slice_returns_requested_page() {
        let items: Vec<i32> = (0..30).collect();
        let p = Pagination {
            page: Some(2),
            per_page: Some(10),
        };
        assert_eq!(p.slice(&items), &items[10..20]);
    }

    #[test]
    fn slice_past_end_is_empty() {
        let items = vec![1, 2, 3];
        let p = Pagination {
            page: Some(9),
            per_page: Some(10),
        };
        assert!(p.slice(&items).is_empty());
    }

    #[test]
    fn paged_result_total_pages() {
        let p = Pagination {
            page: Some(1),
            per_page: Some(10),
        };
        let result = PagedResult::new(vec![1, 2, 3], 25, &p);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total, 25);
        assert_eq!(result.page, 1);
    }
}
