//! HTTP implementation of [`CatalogApi`].
//!
//! Uses `reqwest` for HTTP and `serde_json` for bodies. The featured panel
//! query is cached with `moka`; search queries always hit the service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;

use super::{
    AddToCartRequest, CartError, CartPayload, CartReply, CatalogApi, CatalogError, CatalogItem,
    CatalogQuery, FEATURED_COUNT, FEATURED_SORT, QueryResult, interpret_cart_payload,
};

const BOOKS_PATH: &str = "/api/books";
const CART_ADD_PATH: &str = "/api/cart/add";

/// Longest body excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// HttpCatalogClient
// =============================================================================

/// Client for the catalog JSON API.
///
/// Cheap to clone; clones share the connection pool and the featured cache.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    featured: Cache<&'static str, Vec<CatalogItem>>,
}

impl HttpCatalogClient {
    /// Create a new client for the service at `base_url`.
    ///
    /// `featured_ttl` bounds how long the featured panel may be served from cache.
    #[must_use]
    pub fn new(base_url: Url, featured_ttl: Duration) -> Self {
        let featured = Cache::builder()
            .max_capacity(1)
            .time_to_live(featured_ttl)
            .build();

        Self {
            inner: Arc::new(HttpCatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
                featured,
            }),
        }
    }

    /// Base URL of the catalog service.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build the `/api/books` URL for the given query pairs.
    fn books_url(&self, pairs: &[(&str, String)]) -> Result<Url, url::ParseError> {
        let mut url = self.inner.base_url.join(BOOKS_PATH)?;
        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    /// Execute a catalog GET and decode the page.
    async fn fetch_books(&self, url: Url) -> Result<QueryResult, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Catalog service returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    #[instrument(skip(self), fields(q = %query.q, page = query.page))]
    async fn search(&self, query: &CatalogQuery) -> Result<QueryResult, CatalogError> {
        let url = self.books_url(&query.to_pairs())?;
        let result = self.fetch_books(url).await?;
        debug!(
            items = result.items.len(),
            total = result.total,
            "Catalog search completed"
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn featured(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        if let Some(items) = self.inner.featured.get(FEATURED_SORT).await {
            debug!("Cache hit for featured items");
            return Ok(items);
        }

        let url = self.books_url(&[
            ("sort", FEATURED_SORT.to_string()),
            ("page", "1".to_string()),
        ])?;
        let mut items = self.fetch_books(url).await?.items;
        items.truncate(FEATURED_COUNT);

        self.inner.featured.insert(FEATURED_SORT, items.clone()).await;

        Ok(items)
    }

    #[instrument(skip(self), fields(isbn = %request.isbn13))]
    async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<CartReply, CartError> {
        let url = self.inner.base_url.join(CART_ADD_PATH)?;
        let response = self.inner.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let payload: CartPayload = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(e) if status.is_success() => {
                tracing::error!(
                    error = %e,
                    body = %excerpt(&body),
                    "Failed to parse cart response"
                );
                return Err(CartError::Parse(e));
            }
            Err(_) => {
                tracing::warn!(
                    status = %status,
                    body = %excerpt(&body),
                    "Cart service returned non-success status"
                );
                return Err(CartError::Status(status.as_u16()));
            }
        };

        interpret_cart_payload(status == StatusCode::UNAUTHORIZED, payload)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
