//! Pure mapping from catalog results to display structures.
//!
//! Nothing here touches the page; views receive these structures through
//! [`crate::view::CatalogView`] and draw them however they like.

pub mod cards;
pub mod chips;
pub mod featured;
pub mod stars;

pub use cards::{BookCardView, CardLayout, PLACEHOLDER_IMAGE};
pub use chips::{FilterChip, active_filter_chips};
pub use featured::{FEATURED_ERROR, FeaturedItemView, FeaturedPanel};
pub use stars::StarRating;

use shelfwise_core::ViewMode;

use crate::api::QueryResult;
use crate::pagination::{self, PaginationView};

/// Inline message shown when a catalog query fails.
pub const LOAD_ERROR: &str = "Failed to load books. Please try again later.";

/// Content of the empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyStateView {
    pub title: String,
    pub hint: String,
    /// Label of the one-click "clear filters" control.
    pub clear_label: String,
}

impl Default for EmptyStateView {
    fn default() -> Self {
        Self {
            title: "No books found".to_string(),
            hint: "Try adjusting your search or filters.".to_string(),
            clear_label: "Clear all filters".to_string(),
        }
    }
}

/// Item grid or empty state; never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsBody {
    Items(Vec<BookCardView>),
    Empty(EmptyStateView),
}

/// Everything drawn in the result area for one applied result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    /// Total matching items, for the count header.
    pub total: u64,
    /// `Showing {start}-{end} of {total} books`.
    pub summary: String,
    pub body: ResultsBody,
    /// Absent when there is at most one page or no results.
    pub pagination: Option<PaginationView>,
    pub view_mode: ViewMode,
}

impl ResultsView {
    /// Whether the empty state is shown.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.body, ResultsBody::Empty(_))
    }

    /// Cards currently shown, empty when the empty state is up.
    #[must_use]
    pub fn cards(&self) -> &[BookCardView] {
        match &self.body {
            ResultsBody::Items(cards) => cards,
            ResultsBody::Empty(_) => &[],
        }
    }
}

/// Render one page of results in the given layout.
#[must_use]
pub fn render_results(result: &QueryResult, view_mode: ViewMode) -> ResultsView {
    let summary = results_summary(result);

    if result.is_empty() {
        return ResultsView {
            total: result.total,
            summary,
            body: ResultsBody::Empty(EmptyStateView::default()),
            pagination: None,
            view_mode,
        };
    }

    let layout = CardLayout::from(view_mode);
    let cards = result
        .items
        .iter()
        .map(|item| BookCardView::new(item, layout))
        .collect();

    ResultsView {
        total: result.total,
        summary,
        body: ResultsBody::Items(cards),
        pagination: pagination::controls(result.page, result.pages),
        view_mode,
    }
}

/// Result count line.
///
/// An empty result reads `Showing 0 of 0 books` rather than a `1-0` range.
#[must_use]
pub fn results_summary(result: &QueryResult) -> String {
    if result.total == 0 || result.is_empty() {
        return format!("Showing 0 of {} books", result.total);
    }

    let per_page = u64::from(result.per_page.max(1));
    let page = u64::from(result.page.max(1));
    let start = (page - 1) * per_page + 1;
    let end = (page * per_page).min(result.total);
    format!("Showing {start}-{end} of {} books", result.total)
}
