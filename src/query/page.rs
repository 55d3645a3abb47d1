//! Pagination bounds and next/prev descriptors

use serde::{Deserialize, Serialize};

/// Index window for a page: `start = (page-1)*limit`, `end = page*limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub start: usize,
    pub end: usize,
}

impl PageBounds {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            start: page.saturating_sub(1).saturating_mul(limit),
            end: page.saturating_mul(limit),
        }
    }
}

/// A page pointer reported to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub page: usize,
    pub limit: usize,
}

/// Next/prev descriptors for a list response. `next` is present iff the
/// window ends before the filtered total; `prev` iff the window starts past
/// zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

impl Pagination {
    pub fn compute(page: usize, limit: usize, total: usize) -> Self {
        let bounds = PageBounds::new(page, limit);

        let next = if bounds.end < total {
            Some(PageRef {
                page: page + 1,
                limit,
            })
        } else {
            None
        };

        let prev = if bounds.start > 0 {
            Some(PageRef {
                page: page - 1,
                limit,
            })
        } else {
            None
        };

        Self { next, prev }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let bounds = PageBounds::new(1, 100);
        assert_eq!(bounds.start, 0);
        assert_eq!(bounds.end, 100);

        let bounds = PageBounds::new(3, 25);
        assert_eq!(bounds.start, 50);
        assert_eq!(bounds.end, 75);
    }

    #[test]
    fn test_first_page_of_many() {
        let p = Pagination::compute(1, 10, 25);
        assert_eq!(p.next, Some(PageRef { page: 2, limit: 10 }));
        assert_eq!(p.prev, None);
    }

    #[test]
    fn test_middle_page() {
        let p = Pagination::compute(2, 10, 25);
        assert_eq!(p.next, Some(PageRef { page: 3, limit: 10 }));
        assert_eq!(p.prev, Some(PageRef { page: 1, limit: 10 }));
    }

    #[test]
    fn test_last_page() {
        let p = Pagination::compute(3, 10, 25);
        assert_eq!(p.next, None);
        assert_eq!(p.prev, Some(PageRef { page: 2, limit: 10 }));
    }

    #[test]
    fn test_exact_boundary_has_no_next() {
        // page*limit == total leaves nothing after the window
        let p = Pagination::compute(2, 10, 20);
        assert_eq!(p.next, None);
    }

    #[test]
    fn test_single_page() {
        let p = Pagination::compute(1, 100, 3);
        assert_eq!(p.next, None);
        assert_eq!(p.prev, None);
    }

    #[test]
    fn test_serializes_without_absent_sides() {
        let p = Pagination::compute(1, 10, 25);
        let v = serde_json::to_value(p).unwrap();
        assert!(v.get("next").is_some());
        assert!(v.get("prev").is_none());
    }
}
