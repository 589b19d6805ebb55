//! Pagination helper

use serde::Serialize;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination block included in every list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl Pagination {
    /// Resolve the SQL window for a raw page/per_page request, before
    /// the total row count is known
    pub fn window(page: Option<u32>, per_page: Option<u32>) -> (i64, i64) {
        let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let page = page.unwrap_or(1).max(1);
        ((page as i64 - 1) * per_page as i64, per_page as i64)
    }

    /// Build the response block once the total is known; a page past the
    /// end keeps its number and simply carries no rows
    pub fn new(page: Option<u32>, per_page: Option<u32>, total: i64) -> Self {
        let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let total_pages = (total.max(0) as u64).div_ceil(per_page as u64).max(1) as u32;
        let page = page.unwrap_or(1).max(1);
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let p = Pagination::new(None, None, 45);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(p.total_pages, 3);

        let oversized = Pagination::new(Some(99), Some(10_000), 45);
        assert_eq!(oversized.per_page, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_window_matches_response_block() {
        let (offset, limit) = Pagination::window(Some(3), Some(10));
        assert_eq!(offset, 20);
        assert_eq!(limit, 10);

        let p = Pagination::new(Some(3), Some(10), 45);
        assert_eq!(p.page, 3);
        assert_eq!(p.total_pages, 5);
    }

    #[test]
    fn test_empty_result_still_has_one_page() {
        let p = Pagination::new(None, Some(10), 0);
        assert_eq!(p.total_pages, 1);
        let (offset, _) = Pagination::window(None, Some(10));
        assert_eq!(offset, 0);
    }
}
