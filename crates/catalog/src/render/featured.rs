//! Featured panel view model.

use shelfwise_core::Isbn;

use super::cards::image_url;
use super::stars::StarRating;
use crate::api::{CatalogError, CatalogItem, FEATURED_COUNT};

/// Message shown when the featured query fails.
pub const FEATURED_ERROR: &str = "Could not load featured books.";

/// One entry in the featured panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedItemView {
    pub isbn: Isbn,
    pub title: String,
    pub detail_path: String,
    pub image_url: String,
    pub stars: StarRating,
    pub price: String,
}

/// Contents of the featured panel.
#[derive(Debug, Clone, PartialEq)]
pub enum FeaturedPanel {
    Items(Vec<FeaturedItemView>),
    Unavailable(String),
}

impl FeaturedPanel {
    /// Render the outcome of a featured query.
    #[must_use]
    pub fn from_result(result: &Result<Vec<CatalogItem>, CatalogError>) -> Self {
        match result {
            Ok(items) => Self::Items(
                items
                    .iter()
                    .take(FEATURED_COUNT)
                    .map(|item| FeaturedItemView {
                        isbn: item.isbn.clone(),
                        title: item.title.clone(),
                        detail_path: item.isbn.detail_path(),
                        image_url: image_url(item.image.as_deref()),
                        stars: StarRating::from_rating(item.rating),
                        price: item.price().display(),
                    })
                    .collect(),
            ),
            Err(_) => Self::Unavailable(FEATURED_ERROR.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item(n: u32) -> CatalogItem {
        CatalogItem {
            isbn: Isbn::parse(&format!("978000000000{n}")).unwrap(),
            title: format!("Book {n}"),
            author: String::new(),
            category: String::new(),
            price: Decimal::new(1250, 1),
            stock: 1,
            rating: Some(5.0),
            ratings_count: Some(1),
            image: Some(format!("/covers/{n}.jpg")),
        }
    }

    #[test]
    fn test_takes_first_three() {
        let items = (1..=5).map(item).collect();
        let FeaturedPanel::Items(views) = FeaturedPanel::from_result(&Ok(items)) else {
            panic!("expected items");
        };
        assert_eq!(views.len(), FEATURED_COUNT);
        assert_eq!(views[0].title, "Book 1");
        assert_eq!(views[0].price, "₹125.00");
        assert_eq!(views[2].detail_path, "/book/9780000000003");
    }

    #[test]
    fn test_failure_message() {
        let panel = FeaturedPanel::from_result(&Err(CatalogError::Status(500)));
        assert_eq!(panel, FeaturedPanel::Unavailable(FEATURED_ERROR.to_string()));
    }
}
