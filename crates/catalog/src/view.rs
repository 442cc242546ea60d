//! The page the controller draws into.
//!
//! [`CatalogView`] is implemented by whatever hosts the session. Calls are
//! fire-and-forget and must not block. The controller may hold its session
//! lock while calling in, so implementations must not call back into the
//! controller synchronously.

use shelfwise_core::{Isbn, ViewMode};

use crate::cart::CartButtonState;
use crate::render::{FeaturedPanel, FilterChip, ResultsView};
use crate::state::FilterState;

/// Display surface for one catalog page session.
pub trait CatalogView: Send + Sync {
    /// Dim the result area while a query is outstanding.
    fn set_busy(&self, busy: bool);

    /// Replace the result area with a freshly applied result.
    fn show_results(&self, results: &ResultsView);

    /// Replace the result area with an inline error message.
    fn show_load_error(&self, message: &str);

    /// Redraw the active-filter chips.
    fn show_active_filters(&self, chips: &[FilterChip]);

    fn show_featured(&self, panel: &FeaturedPanel);

    /// Reflect the layout toggle.
    fn show_view_mode(&self, mode: ViewMode);

    /// Redraw one add-to-cart control.
    fn show_cart_button(&self, isbn: &Isbn, state: CartButtonState);

    /// Update the shared cart-count badge.
    fn set_cart_count(&self, count: u32);

    /// Transient user-visible message.
    fn alert(&self, message: &str);

    /// Leave the page.
    fn navigate(&self, target: &str);

    /// Bring the filter inputs in line with the state (after seeding or clearing).
    fn sync_inputs(&self, filters: &FilterState, categories: &[String]);
}

/// View that writes everything to the log. Used by the headless runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingView;

impl CatalogView for TracingView {
    fn set_busy(&self, busy: bool) {
        tracing::debug!(busy, "Result area busy state changed");
    }

    fn show_results(&self, results: &ResultsView) {
        tracing::info!(
            total = results.total,
            view_mode = %results.view_mode,
            "{}",
            results.summary
        );
        for card in results.cards() {
            tracing::info!(
                isbn = %card.isbn,
                price = %card.price,
                stock = %card.stock_label,
                rating = %card.stars.render_text(),
                "{} {}",
                card.title,
                card.byline
            );
        }
        if let Some(pagination) = &results.pagination {
            let pages: Vec<String> = pagination
                .pages
                .iter()
                .map(|link| {
                    if link.active {
                        format!("[{}]", link.label)
                    } else {
                        link.label.clone()
                    }
                })
                .collect();
            tracing::info!(pages = %pages.join(" "), "Pagination");
        }
    }

    fn show_load_error(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn show_active_filters(&self, chips: &[FilterChip]) {
        let labels: Vec<&str> = chips.iter().map(|chip| chip.label.as_str()).collect();
        tracing::info!(filters = ?labels, "Active filters");
    }

    fn show_featured(&self, panel: &FeaturedPanel) {
        match panel {
            FeaturedPanel::Items(items) => {
                for item in items {
                    tracing::info!(
                        isbn = %item.isbn,
                        price = %item.price,
                        "Featured: {}",
                        item.title
                    );
                }
            }
            FeaturedPanel::Unavailable(message) => tracing::warn!("{message}"),
        }
    }

    fn show_view_mode(&self, mode: ViewMode) {
        tracing::debug!(%mode, "View mode");
    }

    fn show_cart_button(&self, isbn: &Isbn, state: CartButtonState) {
        tracing::debug!(%isbn, ?state, "Cart button");
    }

    fn set_cart_count(&self, count: u32) {
        tracing::info!(count, "Cart count updated");
    }

    fn alert(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn navigate(&self, target: &str) {
        tracing::info!(destination = target, "Navigation requested");
    }

    fn sync_inputs(&self, filters: &FilterState, categories: &[String]) {
        tracing::debug!(
            q = filters.query(),
            category = filters.category(),
            author = filters.author(),
            sort = %filters.sort(),
            page = filters.page(),
            categories = categories.len(),
            "Filter inputs synced"
        );
    }
}
