//! Add-to-cart controls.
//!
//! Each control moves `Idle -> Pending -> Success -> Idle` (after the
//! feedback period) or `Pending -> Idle` on failure. A redirect reply hands
//! the page to the login flow and leaves the control pending.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use shelfwise_core::Isbn;
use tracing::{info, warn};

use crate::api::{AddToCartRequest, CartReply, CatalogApi};
use crate::view::CatalogView;

/// How long a control shows its success state.
pub const DEFAULT_CART_FEEDBACK: Duration = Duration::from_secs(2);

/// Visible state of one add-to-cart control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CartButtonState {
    #[default]
    Idle,
    /// Request in flight; the control is disabled.
    Pending,
    /// Shows "Added!" until the feedback period ends.
    Success,
}

impl CartButtonState {
    /// Button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Add to Cart",
            Self::Pending => "Adding...",
            Self::Success => "Added!",
        }
    }
}

/// What happened to one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    Added { cart_count: u32 },
    Redirected(String),
    /// The user saw an alert with this reason.
    Failed(String),
    /// The click was dropped (control busy or item unavailable).
    Ignored,
}

type Buttons = Arc<Mutex<HashMap<Isbn, CartButtonState>>>;

/// Drives every add-to-cart control on the page.
pub struct CartActions {
    api: Arc<dyn CatalogApi>,
    view: Arc<dyn CatalogView>,
    buttons: Buttons,
    feedback: Duration,
}

impl CartActions {
    #[must_use]
    pub fn new(api: Arc<dyn CatalogApi>, view: Arc<dyn CatalogView>, feedback: Duration) -> Self {
        Self {
            api,
            view,
            buttons: Arc::default(),
            feedback,
        }
    }

    /// Current state of the control for `isbn`.
    #[must_use]
    pub fn state(&self, isbn: &Isbn) -> CartButtonState {
        lock(&self.buttons).get(isbn).copied().unwrap_or_default()
    }

    /// Drop idle controls after the result list was replaced.
    ///
    /// Pending and success controls are kept so in-flight requests and
    /// revert timers can still finish them.
    pub fn reset_idle(&self) {
        lock(&self.buttons).retain(|_, state| *state != CartButtonState::Idle);
    }

    /// Handle a click on the control for `isbn`.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn add(&self, isbn: Isbn) -> CartOutcome {
        {
            let mut buttons = lock(&self.buttons);
            let state = buttons.entry(isbn.clone()).or_default();
            if *state != CartButtonState::Idle {
                return CartOutcome::Ignored;
            }
            *state = CartButtonState::Pending;
        }
        self.view.show_cart_button(&isbn, CartButtonState::Pending);

        let reply = self
            .api
            .add_to_cart(&AddToCartRequest::single(isbn.clone()))
            .await;

        match reply {
            Ok(CartReply::Added { cart_count }) => {
                info!(%isbn, cart_count, "Added to cart");
                self.set_state(&isbn, CartButtonState::Success);
                self.view.set_cart_count(cart_count);
                self.schedule_revert(isbn);
                CartOutcome::Added { cart_count }
            }
            Ok(CartReply::Redirect(target)) => {
                info!(%isbn, redirect = %target, "Cart requires login, redirecting");
                self.view.navigate(&target);
                CartOutcome::Redirected(target)
            }
            Err(e) => {
                warn!(%isbn, error = %e, "Add to cart failed");
                let reason = e.user_message();
                self.set_state(&isbn, CartButtonState::Idle);
                self.view.alert(&format!("Failed to add to cart: {reason}"));
                CartOutcome::Failed(reason)
            }
        }
    }

    fn set_state(&self, isbn: &Isbn, state: CartButtonState) {
        lock(&self.buttons).insert(isbn.clone(), state);
        self.view.show_cart_button(isbn, state);
    }

    fn schedule_revert(&self, isbn: Isbn) {
        let buttons = Arc::clone(&self.buttons);
        let view = Arc::clone(&self.view);
        let feedback = self.feedback;

        tokio::spawn(async move {
            tokio::time::sleep(feedback).await;
            let reverted = {
                let mut buttons = lock(&buttons);
                match buttons.get_mut(&isbn) {
                    Some(state) if *state == CartButtonState::Success => {
                        *state = CartButtonState::Idle;
                        true
                    }
                    _ => false,
                }
            };
            if reverted {
                view.show_cart_button(&isbn, CartButtonState::Idle);
            }
        });
    }
}

fn lock(buttons: &Buttons) -> std::sync::MutexGuard<'_, HashMap<Isbn, CartButtonState>> {
    buttons.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::api::{CartError, CatalogError, CatalogItem, CatalogQuery, QueryResult};
    use crate::render::{FeaturedPanel, FilterChip, ResultsView};
    use crate::state::FilterState;
    use shelfwise_core::ViewMode;

    struct FixedCart(fn() -> Result<CartReply, CartError>);

    #[async_trait]
    impl CatalogApi for FixedCart {
        async fn search(&self, _query: &CatalogQuery) -> Result<QueryResult, CatalogError> {
            Err(CatalogError::Status(500))
        }

        async fn featured(&self) -> Result<Vec<CatalogItem>, CatalogError> {
            Ok(Vec::new())
        }

        async fn add_to_cart(&self, _request: &AddToCartRequest) -> Result<CartReply, CartError> {
            (self.0)()
        }
    }

    #[derive(Default)]
    struct Recorder {
        buttons: Mutex<Vec<CartButtonState>>,
        count: Mutex<Option<u32>>,
        alerts: Mutex<Vec<String>>,
        navigations: Mutex<Vec<String>>,
    }

    impl CatalogView for Recorder {
        fn set_busy(&self, _busy: bool) {}
        fn show_results(&self, _results: &ResultsView) {}
        fn show_load_error(&self, _message: &str) {}
        fn show_active_filters(&self, _chips: &[FilterChip]) {}
        fn show_featured(&self, _panel: &FeaturedPanel) {}
        fn show_view_mode(&self, _mode: ViewMode) {}
        fn show_cart_button(&self, _isbn: &Isbn, state: CartButtonState) {
            self.buttons.lock().unwrap().push(state);
        }
        fn set_cart_count(&self, count: u32) {
            *self.count.lock().unwrap() = Some(count);
        }
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
        fn navigate(&self, target: &str) {
            self.navigations.lock().unwrap().push(target.to_string());
        }
        fn sync_inputs(&self, _filters: &FilterState, _categories: &[String]) {}
    }

    fn isbn() -> Isbn {
        Isbn::parse("9780441172719").unwrap()
    }

    fn actions(
        reply: fn() -> Result<CartReply, CartError>,
    ) -> (CartActions, Arc<Recorder>) {
        let view = Arc::new(Recorder::default());
        let actions = CartActions::new(
            Arc::new(FixedCart(reply)),
            Arc::clone(&view) as Arc<dyn CatalogView>,
            DEFAULT_CART_FEEDBACK,
        );
        (actions, view)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_reverts_after_feedback() {
        let (actions, view) = actions(|| Ok(CartReply::Added { cart_count: 4 }));

        let outcome = actions.add(isbn()).await;
        assert_eq!(outcome, CartOutcome::Added { cart_count: 4 });
        assert_eq!(actions.state(&isbn()), CartButtonState::Success);
        assert_eq!(*view.count.lock().unwrap(), Some(4));

        // Clicks during the success period are ignored.
        assert_eq!(actions.add(isbn()).await, CartOutcome::Ignored);

        tokio::time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(actions.state(&isbn()), CartButtonState::Success);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(actions.state(&isbn()), CartButtonState::Idle);
        assert_eq!(
            *view.buttons.lock().unwrap(),
            vec![
                CartButtonState::Pending,
                CartButtonState::Success,
                CartButtonState::Idle
            ]
        );
    }

    #[tokio::test]
    async fn test_rejection_alerts_and_returns_to_idle() {
        let (actions, view) =
            actions(|| Err(CartError::Rejected("Only 2 copies left".to_string())));

        let outcome = actions.add(isbn()).await;

        assert_eq!(outcome, CartOutcome::Failed("Only 2 copies left".to_string()));
        assert_eq!(actions.state(&isbn()), CartButtonState::Idle);
        assert_eq!(
            *view.alerts.lock().unwrap(),
            vec!["Failed to add to cart: Only 2 copies left".to_string()]
        );
        assert_eq!(*view.count.lock().unwrap(), None);
    }

    #[tokio::test]
    async fn test_redirect_navigates_without_alert() {
        let (actions, view) = actions(|| Ok(CartReply::Redirect("/login".to_string())));

        let outcome = actions.add(isbn()).await;

        assert_eq!(outcome, CartOutcome::Redirected("/login".to_string()));
        assert_eq!(*view.navigations.lock().unwrap(), vec!["/login".to_string()]);
        assert!(view.alerts.lock().unwrap().is_empty());
        assert_eq!(actions.state(&isbn()), CartButtonState::Pending);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CartButtonState::Idle.label(), "Add to Cart");
        assert_eq!(CartButtonState::Success.label(), "Added!");
    }
}
