//! Item card view models.

use shelfwise_core::{Isbn, StockStatus, ViewMode};

use super::stars::StarRating;
use crate::api::CatalogItem;

/// Cover shown when an item has no image.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/book-placeholder.jpg";

/// Card arrangement derived from the view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Multi-column tiles.
    Tile,
    /// Full-width rows.
    Row,
}

impl From<ViewMode> for CardLayout {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Grid => Self::Tile,
            ViewMode::List => Self::Row,
        }
    }
}

/// Display data for one catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct BookCardView {
    pub isbn: Isbn,
    pub title: String,
    /// `by {author}`.
    pub byline: String,
    pub category: String,
    pub detail_path: String,
    pub image_url: String,
    /// Formatted price, e.g. `₹499.00`.
    pub price: String,
    pub stock: StockStatus,
    pub stock_label: String,
    pub stars: StarRating,
    pub ratings_count: u64,
    pub layout: CardLayout,
    /// The add-to-cart control is disabled iff this is false.
    pub add_to_cart_enabled: bool,
}

impl BookCardView {
    /// Build the card for `item` in the given layout.
    #[must_use]
    pub fn new(item: &CatalogItem, layout: CardLayout) -> Self {
        let stock = item.stock_status();
        Self {
            isbn: item.isbn.clone(),
            title: item.title.clone(),
            byline: format!("by {}", item.author),
            category: item.category.clone(),
            detail_path: item.isbn.detail_path(),
            image_url: image_url(item.image.as_deref()),
            price: item.price().display(),
            stock,
            stock_label: stock.label(),
            stars: StarRating::from_rating(item.rating),
            ratings_count: item.ratings_count(),
            layout,
            add_to_cart_enabled: stock.is_available(),
        }
    }
}

/// Image URL with the placeholder substituted for missing or blank values.
#[must_use]
pub fn image_url(image: Option<&str>) -> String {
    image
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}
