//! The catalog page controller.
//!
//! [`CatalogController`] owns the session state and reacts to page events.
//! Text inputs are debounced; every other filter change queries at once.
//! Responses are applied in dispatch order only: a response whose ticket is
//! no longer the latest is dropped.
//!
//! The session lock is never held across an `.await`. Dispatching (issue a
//! ticket, write the address, mark busy) and applying (check the ticket,
//! render) each happen under the lock, so the view sees them totally ordered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shelfwise_core::{Isbn, ViewMode};
use tracing::{debug, error, info, warn};

use crate::api::{CatalogApi, CatalogError, QueryResult};
use crate::cart::{CartActions, CartButtonState, CartOutcome};
use crate::categories::CategoryOptions;
use crate::config::ControllerSettings;
use crate::debounce::Debouncer;
use crate::render::{self, FeaturedPanel, LOAD_ERROR, active_filter_chips};
use crate::sequencer::{RequestSequencer, Ticket};
use crate::state::{AddressSeed, FilterField, FilterState, FilterUpdate, SortKey};
use crate::url_sync::{AddressBar, read_address, write_address};
use crate::view::CatalogView;
use crate::view_mode::{ViewModeStore, load_or_default};

/// Fate of one dispatched catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The response was rendered.
    Applied,
    /// The query failed and the inline error was shown.
    Failed,
    /// A newer query was dispatched meanwhile; the response was dropped.
    Discarded,
}

/// Collaborators of a controller.
pub struct CatalogPorts {
    pub api: Arc<dyn CatalogApi>,
    pub view: Arc<dyn CatalogView>,
    pub address: Arc<dyn AddressBar>,
    pub view_modes: Arc<dyn ViewModeStore>,
}

/// Event-driven controller for one catalog page session.
///
/// Cheap to clone; clones drive the same session.
#[derive(Clone)]
pub struct CatalogController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    api: Arc<dyn CatalogApi>,
    view: Arc<dyn CatalogView>,
    address: Arc<dyn AddressBar>,
    view_modes: Arc<dyn ViewModeStore>,
    categories: CategoryOptions,
    session: Mutex<Session>,
    debouncer: Debouncer,
    cart: CartActions,
}

#[derive(Default)]
struct Session {
    filters: FilterState,
    sequencer: RequestSequencer,
    /// Last applied result, cleared when a query fails.
    current: Option<QueryResult>,
}

impl CatalogController {
    #[must_use]
    pub fn new(ports: CatalogPorts, settings: ControllerSettings) -> Self {
        let cart = CartActions::new(
            Arc::clone(&ports.api),
            Arc::clone(&ports.view),
            settings.cart_feedback,
        );

        Self {
            inner: Arc::new(ControllerInner {
                api: ports.api,
                view: ports.view,
                address: ports.address,
                view_modes: ports.view_modes,
                categories: CategoryOptions::resolve(settings.categories),
                session: Mutex::new(Session::default()),
                debouncer: Debouncer::new(settings.debounce),
                cart,
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Snapshot of the current filter state.
    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.session().filters.clone()
    }

    /// Last applied result, if any.
    #[must_use]
    pub fn current_result(&self) -> Option<QueryResult> {
        self.session().current.clone()
    }

    /// Category options offered to the user.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.inner.categories.options()
    }

    /// State of the add-to-cart control for `isbn`.
    #[must_use]
    pub fn cart_button(&self, isbn: &Isbn) -> CartButtonState {
        self.inner.cart.state(isbn)
    }

    /// Whether a debounced query is waiting to fire.
    #[must_use]
    pub fn has_pending_input(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Initial page load.
    ///
    /// Restores the view mode, seeds the filters from the address, then runs
    /// the catalog and featured queries concurrently.
    pub async fn init(&self) -> QueryOutcome {
        let view_mode = load_or_default(self.inner.view_modes.as_ref());
        let seed = read_address(&self.inner.address.current());

        {
            let mut session = self.session();
            let mut filters = FilterState::with_view_mode(view_mode);
            let category = seed
                .category
                .as_deref()
                .map(|category| self.inner.categories.normalize(category));
            filters.apply_seed(AddressSeed { category, ..seed });
            info!(
                q = filters.query(),
                category = filters.category(),
                page = filters.page(),
                view_mode = %view_mode,
                "Catalog session initialised"
            );
            self.inner.view.show_view_mode(view_mode);
            self.inner
                .view
                .sync_inputs(&filters, self.inner.categories.options());
            session.filters = filters;
        }

        let (outcome, ()) = tokio::join!(self.refresh(), self.load_featured());
        outcome
    }

    /// Search box keystroke. Debounced.
    pub fn search_input(&self, text: &str) {
        self.update(FilterUpdate::Query(text.to_string()));
        self.schedule_query();
    }

    /// Author box keystroke. Debounced on the same channel as search.
    pub fn author_input(&self, text: &str) {
        self.update(FilterUpdate::Author(text.to_string()));
        self.schedule_query();
    }

    /// Clear the search box.
    pub async fn clear_search(&self) -> QueryOutcome {
        self.update(FilterUpdate::Query(String::new()));
        self.refresh().await
    }

    /// Category selector change. Unknown names select all categories.
    pub async fn select_category(&self, category: &str) -> QueryOutcome {
        let category = self.inner.categories.normalize(category);
        self.update(FilterUpdate::Category(category));
        self.refresh().await
    }

    /// Price slider movement. Takes effect on the next query.
    pub fn set_price_max(&self, price_max: i64) {
        self.update(FilterUpdate::PriceMax(price_max));
    }

    /// In-stock checkbox change.
    pub async fn toggle_in_stock(&self, in_stock_only: bool) -> QueryOutcome {
        self.update(FilterUpdate::InStockOnly(in_stock_only));
        self.refresh().await
    }

    /// Sort selector change. Keeps the current page.
    pub async fn select_sort(&self, sort: &str) -> QueryOutcome {
        self.update(FilterUpdate::Sort(SortKey::new(sort)));
        self.refresh().await
    }

    /// Pagination click. Pages past the known last page are clamped.
    pub async fn change_page(&self, page: u32) -> QueryOutcome {
        let page = {
            let session = self.session();
            match &session.current {
                Some(result) if result.pages >= 1 => page.min(result.pages),
                _ => page,
            }
        };
        self.update(FilterUpdate::Page(page));
        self.refresh().await
    }

    /// "Apply" button: back to page 1 and query.
    pub async fn apply_filters(&self) -> QueryOutcome {
        self.update(FilterUpdate::Page(1));
        self.refresh().await
    }

    /// "Clear filters" button (also offered by the empty state).
    pub async fn clear_filters(&self) -> QueryOutcome {
        self.update(FilterUpdate::ClearAll);
        self.sync_inputs();
        self.refresh().await
    }

    /// Remove one active-filter chip.
    pub async fn remove_filter(&self, field: FilterField) -> QueryOutcome {
        self.update(FilterUpdate::Remove(field));
        self.sync_inputs();
        self.refresh().await
    }

    /// Grid/list toggle.
    ///
    /// Persists the choice and redraws the last result in the new layout
    /// without querying again.
    pub fn set_view_mode(&self, mode: ViewMode) {
        if let Err(e) = self.inner.view_modes.save(mode) {
            warn!(error = %e, %mode, "Failed to persist view mode");
        }

        let mut session = self.session();
        session.filters.apply(FilterUpdate::ViewMode(mode));
        self.inner.view.show_view_mode(mode);
        if let Some(result) = &session.current {
            self.inner
                .view
                .show_results(&render::render_results(result, mode));
        }
    }

    /// Add-to-cart click.
    ///
    /// Items not in the displayed result, or out of stock, are ignored.
    pub async fn add_to_cart(&self, isbn: &Isbn) -> CartOutcome {
        let available = self.session().current.as_ref().is_some_and(|result| {
            result
                .items
                .iter()
                .any(|item| item.isbn == *isbn && item.stock_status().is_available())
        });
        if !available {
            debug!(%isbn, "Ignoring add to cart for unavailable item");
            return CartOutcome::Ignored;
        }

        self.inner.cart.add(isbn.clone()).await
    }

    /// Query now, dropping any pending debounced query.
    pub async fn refresh(&self) -> QueryOutcome {
        self.inner.debouncer.cancel();
        self.dispatch().await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn session(&self) -> MutexGuard<'_, Session> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, update: FilterUpdate) {
        self.session().filters.apply(update);
    }

    fn sync_inputs(&self) {
        let session = self.session();
        self.inner
            .view
            .sync_inputs(&session.filters, self.inner.categories.options());
    }

    fn schedule_query(&self) {
        let controller = self.clone();
        self.inner.debouncer.schedule(async move {
            controller.dispatch().await;
        });
    }

    async fn dispatch(&self) -> QueryOutcome {
        let (ticket, query) = {
            let mut session = self.session();
            let ticket = session.sequencer.issue();
            let address = write_address(&self.inner.address.current(), &session.filters);
            self.inner.address.replace(address);
            self.inner.view.set_busy(true);
            self.inner
                .view
                .show_active_filters(&active_filter_chips(&session.filters));
            (ticket, session.filters.to_query())
        };

        debug!(%ticket, q = %query.q, page = query.page, "Dispatching catalog query");
        let result = self.inner.api.search(&query).await;
        self.apply_response(ticket, result)
    }

    fn apply_response(
        &self,
        ticket: Ticket,
        result: Result<QueryResult, CatalogError>,
    ) -> QueryOutcome {
        let mut session = self.session();
        if !session.sequencer.is_current(ticket) {
            debug!(
                %ticket,
                latest = ?session.sequencer.latest(),
                "Discarding stale catalog response"
            );
            return QueryOutcome::Discarded;
        }

        match result {
            Ok(result) => {
                let view = render::render_results(&result, session.filters.view_mode());
                self.inner.view.show_results(&view);
                self.inner.view.set_busy(false);
                self.inner.cart.reset_idle();
                session.current = Some(result);
                QueryOutcome::Applied
            }
            Err(e) => {
                error!(%ticket, error = %e, "Catalog query failed");
                self.inner.view.show_load_error(LOAD_ERROR);
                self.inner.view.set_busy(false);
                session.current = None;
                QueryOutcome::Failed
            }
        }
    }

    async fn load_featured(&self) {
        let result = self.inner.api.featured().await;
        if let Err(e) = &result {
            warn!(error = %e, "Failed to load featured items");
        }
        self.inner
            .view
            .show_featured(&FeaturedPanel::from_result(&result));
    }
}
