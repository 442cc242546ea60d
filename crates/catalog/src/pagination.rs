//! Pagination control layout.
//!
//! At most [`WINDOW_SIZE`] page numbers are shown, kept centred on the
//! current page where possible and shifted at either end of the range.

/// Maximum number of numbered page links.
pub const WINDOW_SIZE: u32 = 7;

/// One link in the pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Page navigated to when the link is activated.
    pub page: u32,
    /// Visible label.
    pub label: String,
    /// Marks the current page.
    pub active: bool,
    /// Whether the link is inert.
    pub disabled: bool,
}

/// Previous/next arrows plus the numbered window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub previous: PageLink,
    pub pages: Vec<PageLink>,
    pub next: PageLink,
}

/// Compute the inclusive range of page numbers to show.
///
/// `total_pages == 0` is treated as a single page and `page` is clamped into
/// range, so the result is always a non-empty subrange of `[1, total]`.
#[must_use]
pub fn window(page: u32, total_pages: u32) -> (u32, u32) {
    let total = total_pages.max(1);
    let page = page.clamp(1, total);

    let mut start = page.saturating_sub(WINDOW_SIZE / 2).max(1);
    let end = start.saturating_add(WINDOW_SIZE - 1).min(total);
    if end - start + 1 < WINDOW_SIZE {
        start = end.saturating_sub(WINDOW_SIZE - 1).max(1);
    }
    (start, end)
}

/// Build the pagination control, or `None` when there is only one page.
#[must_use]
pub fn controls(page: u32, total_pages: u32) -> Option<PaginationView> {
    if total_pages <= 1 {
        return None;
    }

    let page = page.clamp(1, total_pages);
    let (start, end) = window(page, total_pages);

    let pages = (start..=end)
        .map(|n| PageLink {
            page: n,
            label: n.to_string(),
            active: n == page,
            disabled: false,
        })
        .collect();

    Some(PaginationView {
        previous: PageLink {
            page: page.saturating_sub(1).max(1),
            label: "Previous".to_string(),
            active: false,
            disabled: page == 1,
        },
        pages,
        next: PageLink {
            page: page.saturating_add(1).min(total_pages),
            label: "Next".to_string(),
            active: false,
            disabled: page == total_pages,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_window_examples() {
        assert_eq!(window(10, 20), (7, 13));
        assert_eq!(window(20, 20), (14, 20));
        assert_eq!(window(1, 5), (1, 5));
        assert_eq!(window(2, 3), (1, 3));
        assert_eq!(window(1, 10), (1, 7));
        assert_eq!(window(9, 10), (4, 10));
    }

    #[test]
    fn test_window_degenerate_totals() {
        assert_eq!(window(1, 0), (1, 1));
        assert_eq!(window(7, 1), (1, 1));
    }

    #[test]
    fn test_controls_hidden_for_single_page() {
        assert!(controls(1, 1).is_none());
        assert!(controls(1, 0).is_none());
    }

    #[test]
    fn test_controls_first_page() {
        let view = controls(1, 10).unwrap();
        assert!(view.previous.disabled);
        assert!(!view.next.disabled);
        assert_eq!(view.next.page, 2);

        let labels: Vec<&str> = view.pages.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(
            view.pages.iter().filter(|l| l.active).map(|l| l.page).collect::<Vec<_>>(),
            vec![1]
        );
    }

    #[test]
    fn test_controls_last_page() {
        let view = controls(10, 10).unwrap();
        assert!(!view.previous.disabled);
        assert_eq!(view.previous.page, 9);
        assert!(view.next.disabled);
    }

    #[test]
    fn test_huge_page_counts() {
        assert_eq!(window(u32::MAX, u32::MAX), (u32::MAX - 6, u32::MAX));
        assert_eq!(window(1, u32::MAX), (1, 7));

        let view = controls(u32::MAX, u32::MAX).unwrap();
        assert!(view.next.disabled);
        assert_eq!(view.next.page, u32::MAX);
        assert_eq!(view.pages.len(), 7);

        let view = controls(u32::MAX - 1, u32::MAX).unwrap();
        assert_eq!(view.next.page, u32::MAX);
        assert!(!view.next.disabled);
    }

    proptest! {
        #[test]
        fn window_stays_in_range(page in 0u32..200, total in 0u32..200) {
            let (start, end) = window(page, total);
            prop_assert!(start >= 1);
            prop_assert!(start <= end);
            prop_assert!(end <= total.max(1));
            prop_assert!(end - start < WINDOW_SIZE);
        }

        #[test]
        fn window_contains_page_and_is_full_when_possible(total in 1u32..200, seed in 0u32..200) {
            let page = seed % total + 1;
            let (start, end) = window(page, total);
            prop_assert!(start <= page && page <= end);
            prop_assert_eq!(end - start + 1, WINDOW_SIZE.min(total));
        }

        #[test]
        fn controls_never_overflow(page in any::<u32>(), total in any::<u32>()) {
            let (start, end) = window(page, total);
            prop_assert!(start <= end && end <= total.max(1));
            if let Some(view) = controls(page, total) {
                prop_assert!(view.next.page <= total);
                prop_assert!(view.previous.page >= 1);
                prop_assert!(view.pages.len() <= WINDOW_SIZE as usize);
            }
        }
    }
}
