//! Integration test support for Shelfwise.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelfwise-integration-tests
//! ```
//!
//! Everything runs in-process: [`MockCatalogService`] serves the catalog and
//! cart endpoints with axum on an ephemeral port, [`ScriptedCatalog`] lets a
//! test decide when each search answers, and [`RecordingView`] captures what
//! the controller draws.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use shelfwise_catalog::api::{
    AddToCartRequest, CartError, CartReply, CatalogApi, CatalogError, CatalogItem, CatalogQuery,
    QueryResult,
};
use shelfwise_catalog::cart::CartButtonState;
use shelfwise_catalog::render::{FeaturedPanel, FilterChip, ResultsView};
use shelfwise_catalog::state::FilterState;
use shelfwise_catalog::view::CatalogView;
use shelfwise_core::{Isbn, ViewMode};
use tokio::sync::{mpsc, oneshot};
use url::Url;

/// ISBN the mock cart answers with a login redirect.
pub const LOGIN_REQUIRED_ISBN: &str = "9780000000000";

/// Search term the mock catalog answers with HTTP 500.
pub const FAILING_QUERY: &str = "boom";

/// Page size of the mock catalog.
pub const MOCK_PER_PAGE: usize = 2;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build a catalog item with sensible defaults.
///
/// # Panics
///
/// Panics if `isbn` is not a valid catalog key.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn book(isbn: &str, title: &str, stock: i64) -> CatalogItem {
    CatalogItem {
        isbn: Isbn::parse(isbn).unwrap_or_else(|e| panic!("bad test isbn {isbn}: {e}")),
        title: title.to_string(),
        author: "Test Author".to_string(),
        category: "Fiction".to_string(),
        price: Decimal::new(34_900, 2),
        stock,
        rating: Some(4.5),
        ratings_count: Some(12),
        image: None,
    }
}

/// A single page of results.
#[must_use]
pub fn page_of(items: Vec<CatalogItem>, page: u32, pages: u32, total: u64) -> QueryResult {
    QueryResult {
        items,
        page,
        pages,
        total,
        per_page: 12,
    }
}

// =============================================================================
// Mock catalog service (axum)
// =============================================================================

#[derive(Default)]
struct MockState {
    books: Vec<CatalogItem>,
    requests: Mutex<Vec<HashMap<String, String>>>,
    cart_count: Mutex<u32>,
}

/// In-process HTTP catalog service.
pub struct MockCatalogService {
    base_url: Url,
    state: Arc<MockState>,
}

impl MockCatalogService {
    /// Start serving `books` on an ephemeral local port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(books: Vec<CatalogItem>) -> Self {
        let state = Arc::new(MockState {
            books,
            ..MockState::default()
        });

        let app = Router::new()
            .route("/api/books", get(search_books))
            .route("/api/cart/add", post(add_to_cart))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog listener");
        let addr = listener.local_addr().expect("Listener has no local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock catalog server error");
        });

        let base_url = Url::parse(&format!("http://{addr}")).expect("Invalid mock base URL");
        Self { base_url, state }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Query strings of every `GET /api/books` received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        lock(&self.state.requests).clone()
    }
}

async fn search_books(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    lock(&state.requests).push(params.clone());

    let q = params.get("q").map(String::as_str).unwrap_or_default();
    if q == FAILING_QUERY {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "boom"})),
        );
    }

    let in_stock = params.get("in_stock").is_some_and(|v| v == "true");
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);

    let matching: Vec<&CatalogItem> = state
        .books
        .iter()
        .filter(|b| !in_stock || b.stock > 0)
        .filter(|b| q.is_empty() || b.title.to_lowercase().contains(&q.to_lowercase()))
        .collect();

    let total = matching.len();
    let pages = total.div_ceil(MOCK_PER_PAGE);
    let books: Vec<&CatalogItem> = matching
        .into_iter()
        .skip((page - 1) * MOCK_PER_PAGE)
        .take(MOCK_PER_PAGE)
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "books": books,
            "page": page,
            "pages": pages,
            "total": total,
            "per_page": MOCK_PER_PAGE,
        })),
    )
}

#[derive(Deserialize)]
struct AddBody {
    isbn13: String,
    quantity: u32,
}

async fn add_to_cart(
    State(state): State<Arc<MockState>>,
    Json(body): Json<AddBody>,
) -> (StatusCode, Json<Value>) {
    if body.isbn13 == LOGIN_REQUIRED_ISBN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"redirect": "/login?next=/catalog"})),
        );
    }

    let Some(book) = state.books.iter().find(|b| b.isbn.as_str() == body.isbn13) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Book not found"})),
        );
    };

    if book.stock <= 0 {
        return (
            StatusCode::OK,
            Json(json!({"success": false, "message": "Out of stock"})),
        );
    }

    let mut count = lock(&state.cart_count);
    *count += body.quantity;
    (
        StatusCode::OK,
        Json(json!({"success": true, "cart_count": *count})),
    )
}

// =============================================================================
// Scripted catalog
// =============================================================================

/// A search waiting for the test to answer it.
pub struct PendingSearch {
    pub query: CatalogQuery,
    reply: oneshot::Sender<Result<QueryResult, CatalogError>>,
}

impl PendingSearch {
    /// Complete the search.
    pub fn respond(self, result: Result<QueryResult, CatalogError>) {
        // The controller may have given up on the request; that is fine.
        let _ = self.reply.send(result);
    }
}

/// [`CatalogApi`] whose searches block until the test answers them.
pub struct ScriptedCatalog {
    searches: mpsc::UnboundedSender<PendingSearch>,
}

impl ScriptedCatalog {
    /// Create the catalog and the receiver of its pending searches.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingSearch>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { searches: tx }, rx)
    }
}

#[async_trait]
impl CatalogApi for ScriptedCatalog {
    async fn search(&self, query: &CatalogQuery) -> Result<QueryResult, CatalogError> {
        let (reply, answer) = oneshot::channel();
        let pending = PendingSearch {
            query: query.clone(),
            reply,
        };
        if self.searches.send(pending).is_err() {
            return Err(CatalogError::Status(503));
        }
        answer.await.unwrap_or(Err(CatalogError::Status(503)))
    }

    async fn featured(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(Vec::new())
    }

    async fn add_to_cart(&self, _request: &AddToCartRequest) -> Result<CartReply, CartError> {
        Ok(CartReply::Added { cart_count: 1 })
    }
}

// =============================================================================
// Recording view
// =============================================================================

/// Everything the controller drew, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Busy(bool),
    Results(ResultsView),
    LoadError(String),
    Chips(Vec<FilterChip>),
    Featured(FeaturedPanel),
    ViewMode(ViewMode),
    CartButton(Isbn, CartButtonState),
    CartCount(u32),
    Alert(String),
    Navigate(String),
    InputsSynced,
}

/// [`CatalogView`] that records every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        lock(&self.events).clone()
    }

    /// Every result set shown, oldest first.
    #[must_use]
    pub fn results(&self) -> Vec<ResultsView> {
        lock(&self.events)
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Results(results) => Some(results.clone()),
                _ => None,
            })
            .collect()
    }

    /// Most recent result set shown.
    #[must_use]
    pub fn last_results(&self) -> Option<ResultsView> {
        self.results().pop()
    }

    /// Busy flag after the last change.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        lock(&self.events)
            .iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::Busy(busy) => Some(*busy),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn push(&self, event: ViewEvent) {
        lock(&self.events).push(event);
    }
}

impl CatalogView for RecordingView {
    fn set_busy(&self, busy: bool) {
        self.push(ViewEvent::Busy(busy));
    }

    fn show_results(&self, results: &ResultsView) {
        self.push(ViewEvent::Results(results.clone()));
    }

    fn show_load_error(&self, message: &str) {
        self.push(ViewEvent::LoadError(message.to_string()));
    }

    fn show_active_filters(&self, chips: &[FilterChip]) {
        self.push(ViewEvent::Chips(chips.to_vec()));
    }

    fn show_featured(&self, panel: &FeaturedPanel) {
        self.push(ViewEvent::Featured(panel.clone()));
    }

    fn show_view_mode(&self, mode: ViewMode) {
        self.push(ViewEvent::ViewMode(mode));
    }

    fn show_cart_button(&self, isbn: &Isbn, state: CartButtonState) {
        self.push(ViewEvent::CartButton(isbn.clone(), state));
    }

    fn set_cart_count(&self, count: u32) {
        self.push(ViewEvent::CartCount(count));
    }

    fn alert(&self, message: &str) {
        self.push(ViewEvent::Alert(message.to_string()));
    }

    fn navigate(&self, target: &str) {
        self.push(ViewEvent::Navigate(target.to_string()));
    }

    fn sync_inputs(&self, _filters: &FilterState, _categories: &[String]) {
        self.push(ViewEvent::InputsSynced);
    }
}
