//! Wire types for the catalog service.
//!
//! These mirror the JSON the service speaks. Display concerns live in
//! [`crate::render`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shelfwise_core::{CurrencyCode, Isbn, Price, StockStatus};

// =============================================================================
// Catalog Query
// =============================================================================

/// Parameters of one `GET /api/books` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogQuery {
    /// Free-text search term.
    pub q: String,
    /// Category name; empty means all categories.
    pub category: String,
    /// Upper price bound.
    pub price_max: u32,
    /// Author filter.
    pub author: String,
    /// Only items with stock > 0.
    pub in_stock: bool,
    /// Server-defined sort key.
    pub sort: String,
    /// 1-based page number.
    pub page: u32,
}

impl CatalogQuery {
    /// Query string pairs in the order the service documents them.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("category", self.category.clone()),
            ("price_max", self.price_max.to_string()),
            ("author", self.author.clone()),
            ("in_stock", self.in_stock.to_string()),
            ("sort", self.sort.clone()),
            ("page", self.page.to_string()),
        ]
    }
}

// =============================================================================
// Catalog Items
// =============================================================================

/// One book as returned by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Catalog key.
    pub isbn: Isbn,
    /// Book title.
    pub title: String,
    /// Author display name.
    #[serde(default)]
    pub author: String,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Unit price in rupees.
    pub price: Decimal,
    /// Copies in stock (the service may report negatives after oversells).
    #[serde(default)]
    pub stock: i64,
    /// Average rating on a 0-5 scale.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Number of ratings behind `rating`.
    #[serde(default)]
    pub ratings_count: Option<u64>,
    /// Cover image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl CatalogItem {
    /// Price with the storefront currency attached.
    #[must_use]
    pub const fn price(&self) -> Price {
        Price::new(self.price, CurrencyCode::INR)
    }

    /// Stock badge classification.
    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }

    /// Ratings count, treating a missing count as zero.
    #[must_use]
    pub fn ratings_count(&self) -> u64 {
        self.ratings_count.unwrap_or(0)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Items on this page, in server order.
    #[serde(rename = "books", default)]
    pub items: Vec<CatalogItem>,
    /// Current page (1-based).
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Page size used by the service.
    pub per_page: u32,
}

impl QueryResult {
    /// Whether the result contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Body of `POST /api/cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCartRequest {
    /// Book to add.
    pub isbn13: Isbn,
    /// Number of copies.
    pub quantity: u32,
}

impl AddToCartRequest {
    /// Add a single copy of a book.
    #[must_use]
    pub const fn single(isbn13: Isbn) -> Self {
        Self {
            isbn13,
            quantity: 1,
        }
    }
}

/// Raw response body of `POST /api/cart/add`.
///
/// Successful, rejected and unauthorized replies share this shape; which
/// fields are present depends on the outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPayload {
    /// Whether the item was added.
    #[serde(default)]
    pub success: bool,
    /// Cart size after the mutation.
    #[serde(default)]
    pub cart_count: Option<u32>,
    /// Human-readable reason, mostly on failure.
    #[serde(default)]
    pub message: Option<String>,
    /// Login page to navigate to when the session is not authenticated.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Interpreted outcome of a cart mutation that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartReply {
    /// Item added; the cart now holds `cart_count` items.
    Added {
        /// Server-reported cart size.
        cart_count: u32,
    },
    /// The session must navigate to `target` before it can use the cart.
    Redirect(String),
}
