//! Catalog service and cart backend access.
//!
//! # Architecture
//!
//! - [`CatalogApi`] is the seam between the controller and the network
//! - [`HttpCatalogClient`] implements it with `reqwest` against the JSON API
//! - The featured panel query is cached via `moka` (short TTL); search
//!   results are never cached, every query goes to the service
//!
//! # Endpoints
//!
//! - `GET /api/books?q&category&price_max&author&in_stock&sort&page`
//! - `POST /api/cart/add` with `{ isbn13, quantity }`
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfwise_catalog::api::{CatalogApi, HttpCatalogClient};
//!
//! let client = HttpCatalogClient::new(config.base_url.clone(), config.featured_cache_ttl);
//! let result = client.search(&filters.to_query()).await?;
//! ```

mod client;
pub mod types;

pub use client::HttpCatalogClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Sort key and page used by the featured panel.
pub const FEATURED_SORT: &str = "rating";

/// Number of items shown in the featured panel.
pub const FEATURED_COUNT: usize = 3;

/// Errors that can occur when querying the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("Catalog service returned HTTP {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the configured base URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors that can occur when mutating the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status and no readable body.
    #[error("Cart service returned HTTP {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the configured base URL.
    #[error("Invalid cart URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Server refused the mutation (`success: false`).
    #[error("{0}")]
    Rejected(String),
}

impl CartError {
    /// Reason shown to the user in the failure alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Http(_) => "Network error".to_string(),
            Self::Status(code) => format!("Server error ({code})"),
            Self::Parse(_) | Self::InvalidUrl(_) => "Unexpected server response".to_string(),
        }
    }
}

/// Remote catalog and cart operations used by the controller.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Run a catalog search.
    async fn search(&self, query: &CatalogQuery) -> Result<QueryResult, CatalogError>;

    /// Top-rated items for the featured panel (at most [`FEATURED_COUNT`]).
    async fn featured(&self) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Add one line to the session's cart.
    async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<CartReply, CartError>;
}

/// Interpret a cart response body.
///
/// A `redirect` on an unauthorized reply short-circuits everything else.
/// Otherwise `success` decides; a missing message falls back to a generic one.
pub(crate) fn interpret_cart_payload(
    unauthorized: bool,
    payload: CartPayload,
) -> Result<CartReply, CartError> {
    if unauthorized && let Some(target) = payload.redirect {
        return Ok(CartReply::Redirect(target));
    }

    if payload.success {
        return Ok(CartReply::Added {
            cart_count: payload.cart_count.unwrap_or(0),
        });
    }

    Err(CartError::Rejected(
        payload
            .message
            .unwrap_or_else(|| "Failed to add to cart".to_string()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Status(503);
        assert_eq!(err.to_string(), "Catalog service returned HTTP 503");
    }

    #[test]
    fn test_unauthorized_redirect_wins() {
        let payload = CartPayload {
            success: true,
            cart_count: Some(3),
            message: None,
            redirect: Some("/login?next=/catalog".to_string()),
        };
        let reply = interpret_cart_payload(true, payload);
        assert!(matches!(reply, Ok(CartReply::Redirect(ref t)) if t == "/login?next=/catalog"));
    }

    #[test]
    fn test_redirect_ignored_when_authorized() {
        let payload = CartPayload {
            success: true,
            cart_count: Some(3),
            message: None,
            redirect: Some("/login".to_string()),
        };
        let reply = interpret_cart_payload(false, payload);
        assert!(matches!(reply, Ok(CartReply::Added { cart_count: 3 })));
    }

    #[test]
    fn test_rejected_uses_server_message() {
        let payload = CartPayload {
            success: false,
            message: Some("Only 2 copies left".to_string()),
            ..CartPayload::default()
        };
        let err = interpret_cart_payload(false, payload).unwrap_err();
        assert_eq!(err.user_message(), "Only 2 copies left");
    }

    #[test]
    fn test_rejected_without_message() {
        let err = interpret_cart_payload(false, CartPayload::default()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to add to cart");
    }

    #[test]
    fn test_unauthorized_without_redirect_is_rejected() {
        let err = interpret_cart_payload(true, CartPayload::default()).unwrap_err();
        assert!(matches!(err, CartError::Rejected(_)));
    }
}
