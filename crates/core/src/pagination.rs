//! Pagination window math for list endpoints.
//!
//! Pages are 1-based. `paginate` turns a total row count plus the requested
//! window into the navigation envelope the API returns alongside list items.

use serde::Serialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: i64 = 100;

/// Largest accepted page size; bigger requests are clamped down to this.
pub const MAX_ITEMS_PER_PAGE: i64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub items_per_page: i64,
    pub current_page: i64,
    pub previous_page: Option<i64>,
    pub next_page: Option<i64>,
    pub has_previous: bool,
    pub has_next: bool,
    pub total_num_items: i64,
    pub total_num_pages: i64,
}

/// Clamp raw query parameters into a usable (page, items_per_page) pair.
pub fn normalize_page_params(current_page: Option<i64>, items_per_page: Option<i64>) -> (i64, i64) {
    let page = current_page.unwrap_or(1).max(1);
    let per_page = items_per_page
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(1, MAX_ITEMS_PER_PAGE);
    (page, per_page)
}

/// Row offset of the first item on `current_page`.
pub fn page_offset(current_page: i64, items_per_page: i64) -> i64 {
    (current_page.max(1) - 1) * items_per_page
}

/// Build the pagination envelope for a window over `total_num_items` rows.
pub fn paginate(total_num_items: i64, current_page: i64, items_per_page: i64) -> Pagination {
    // Ceiling division; zero rows means zero pages.
    let total_num_pages = (total_num_items + items_per_page - 1) / items_per_page;
    let has_previous = current_page > 1;
    let has_next = current_page < total_num_pages;

    Pagination {
        items_per_page,
        current_page,
        previous_page: has_previous.then(|| current_page - 1),
        next_page: has_next.then(|| current_page + 1),
        has_previous,
        has_next,
        total_num_items,
        total_num_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_set() {
        let p = paginate(0, 1, 30);
        assert_eq!(p.total_num_pages, 0);
        assert_eq!(p.previous_page, None);
        assert_eq!(p.next_page, None);
        assert!(!p.has_previous);
        assert!(!p.has_next);
    }

    #[test]
    fn partial_last_page_rounds_up() {
        let p = paginate(31, 1, 30);
        assert_eq!(p.total_num_pages, 2);
        assert_eq!(p.next_page, Some(2));
        assert!(p.has_next);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let p = paginate(60, 2, 30);
        assert_eq!(p.total_num_pages, 2);
        assert_eq!(p.previous_page, Some(1));
        assert_eq!(p.next_page, None);
        assert!(!p.has_next);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let p = paginate(100, 2, 30);
        assert_eq!(p.previous_page, Some(1));
        assert_eq!(p.next_page, Some(3));
        assert_eq!(p.total_num_pages, 4);
    }

    #[test]
    fn offsets_are_one_based() {
        assert_eq!(page_offset(1, 30), 0);
        assert_eq!(page_offset(2, 30), 30);
        assert_eq!(page_offset(0, 30), 0);
    }

    #[test]
    fn params_are_clamped() {
        assert_eq!(normalize_page_params(None, None), (1, DEFAULT_ITEMS_PER_PAGE));
        assert_eq!(normalize_page_params(Some(0), Some(0)), (1, 1));
        assert_eq!(
            normalize_page_params(Some(3), Some(MAX_ITEMS_PER_PAGE + 1)),
            (3, MAX_ITEMS_PER_PAGE)
        );
    }
}
