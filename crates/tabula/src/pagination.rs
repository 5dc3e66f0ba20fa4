//! Page arithmetic: page counts, page slices and the page-button window.

use std::ops::Range;

use serde::Serialize;

/// Maximum number of page buttons in the window.
pub const WINDOW: usize = 5;

/// Number of pages needed for `total` items, never less than 1.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Index range of `page` (1-based) within a sequence of `len` items.
///
/// Pages past the end yield an empty range at `len`.
pub fn page_range(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// Page numbers to show as buttons, at most [`WINDOW`] of them.
///
/// ```
/// use tabula::pagination::page_window;
///
/// assert_eq!(page_window(2, 3), vec![1, 2, 3]);
/// assert_eq!(page_window(1, 9), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(5, 9), vec![3, 4, 5, 6, 7]);
/// assert_eq!(page_window(8, 9), vec![5, 6, 7, 8, 9]);
/// ```
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total <= WINDOW {
        return (1..=total).collect();
    }
    let half = WINDOW / 2;
    let start = if current <= half + 1 {
        1
    } else if current >= total - half {
        total - WINDOW + 1
    } else {
        current - half
    };
    (start..start + WINDOW).collect()
}

/// Pagination summary for one computed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Number of records after search and filters.
    pub total_filtered: usize,
    pub window: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
    /// 1-based position of the first record on the page, 0 when empty.
    pub first_item: usize,
    /// 1-based position of the last record on the page, 0 when empty.
    pub last_item: usize,
}

impl PageInfo {
    /// Derives the summary; `current_page` is clamped into range.
    pub fn new(current_page: usize, page_size: usize, total_filtered: usize) -> Self {
        let total = total_pages(total_filtered, page_size);
        let current = current_page.clamp(1, total);
        let range = page_range(current, page_size, total_filtered);
        let (first_item, last_item) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };

        PageInfo {
            current_page: current,
            total_pages: total,
            page_size: page_size.max(1),
            total_filtered,
            window: page_window(current, total),
            has_prev: total > 0 && current > 1,
            has_next: total > 0 && current < total,
            first_item,
            last_item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(0, 0), 1);
    }

    #[test]
    fn page_range_slices() {
        assert_eq!(page_range(1, 10, 23), 0..10);
        assert_eq!(page_range(3, 10, 23), 20..23);
        assert_eq!(page_range(4, 10, 23), 23..23);
        assert_eq!(page_range(1, 10, 0), 0..0);
    }

    #[test]
    fn window_small_totals_show_everything() {
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(4, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_near_start() {
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_near_end() {
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_middle_is_centered() {
        assert_eq!(page_window(4, 10), vec![2, 3, 4, 5, 6]);
        assert_eq!(page_window(7, 10), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn page_info_for_23_records() {
        let info = PageInfo::new(2, 10, 23);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.window, vec![1, 2, 3]);
        assert!(info.has_prev);
        assert!(info.has_next);
        assert_eq!((info.first_item, info.last_item), (11, 20));
    }

    #[test]
    fn page_info_edges() {
        let first = PageInfo::new(1, 10, 23);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = PageInfo::new(3, 10, 23);
        assert!(last.has_prev);
        assert!(!last.has_next);
        assert_eq!((last.first_item, last.last_item), (21, 23));
    }

    #[test]
    fn page_info_clamps_and_handles_empty() {
        let info = PageInfo::new(7, 10, 0);
        assert_eq!(info.current_page, 1);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_prev);
        assert!(!info.has_next);
        assert_eq!((info.first_item, info.last_item), (0, 0));
    }
}
