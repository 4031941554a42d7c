// Pagination math for search results.
// GitHub search only exposes the first 1000 results, so page counts are capped.

/// Maximum number of results the search API will page through.
pub const RESULT_CEILING: u64 = 1000;

/// Number of page buttons shown at once.
pub const WINDOW_SIZE: u32 = 5;

/// Number of results actually reachable.
pub fn reachable_results(total_count: u64) -> u64 {
    total_count.min(RESULT_CEILING)
}

/// Whether GitHub reported more results than can be shown.
pub fn exceeds_ceiling(total_count: u64) -> bool {
    total_count > RESULT_CEILING
}

/// Number of reachable pages.
pub fn total_pages(total_count: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    reachable_results(total_count).div_ceil(per_page) as u32
}

/// Whether `page` shows the last reachable result.
pub fn is_last_page(page: u32, per_page: u32, total_count: u64) -> bool {
    u64::from(page) * u64::from(per_page) >= reachable_results(total_count)
}

/// Page numbers to display around `page`.
///
/// Shows the first pages near the start, the last pages near the end, and
/// centers on the current page otherwise.
pub fn page_window(page: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }

    let len = WINDOW_SIZE.min(total_pages);
    let latest_start = total_pages - len + 1;
    let start = page.saturating_sub(WINDOW_SIZE / 2).clamp(1, latest_start);

    (start..start + len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_capped() {
        assert_eq!(total_pages(5000, 24), 42);
        assert_eq!(total_pages(1000, 24), 42);
        assert_eq!(total_pages(30, 24), 2);
        assert_eq!(total_pages(24, 24), 1);
        assert_eq!(total_pages(0, 24), 0);
    }

    #[test]
    fn test_is_last_page() {
        assert!(!is_last_page(41, 24, 5000));
        assert!(is_last_page(42, 24, 5000));
        assert!(is_last_page(1, 24, 10));
        assert!(is_last_page(1, 24, 0));
    }

    #[test]
    fn test_ceiling_badge() {
        assert!(exceeds_ceiling(1001));
        assert!(!exceeds_ceiling(1000));
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(page_window(1, 42), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 42), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_centered() {
        assert_eq!(page_window(3, 42), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 42), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(page_window(41, 42), vec![38, 39, 40, 41, 42]);
        assert_eq!(page_window(42, 42), vec![38, 39, 40, 41, 42]);
    }

    #[test]
    fn test_window_with_few_pages() {
        assert_eq!(page_window(3, 3), vec![1, 2, 3]);
        assert_eq!(page_window(1, 1), vec![1]);
        assert!(page_window(1, 0).is_empty());
    }
}
