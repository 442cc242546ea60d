//! Integration tests for the HTTP catalog client against the mock service.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use shelfwise_catalog::api::{
    AddToCartRequest, CartError, CartReply, CatalogApi, CatalogError, HttpCatalogClient,
};
use shelfwise_catalog::state::{FilterState, FilterUpdate};
use shelfwise_core::Isbn;
use shelfwise_integration_tests::{FAILING_QUERY, LOGIN_REQUIRED_ISBN, MockCatalogService, book};

fn shelf() -> Vec<shelfwise_catalog::api::CatalogItem> {
    vec![
        book("9780441172719", "Dune", 7),
        book("9780553293357", "Foundation", 0),
        book("9780547928227", "The Hobbit", 40),
        book("9780765326355", "The Way of Kings", 12),
        book("9780345391803", "Hitchhiker's Guide", 3),
    ]
}

fn client(service: &MockCatalogService) -> HttpCatalogClient {
    HttpCatalogClient::new(service.base_url().clone(), Duration::from_secs(60))
}

#[tokio::test]
async fn test_search_sends_every_parameter() {
    let service = MockCatalogService::start(shelf()).await;
    let client = client(&service);

    let mut filters = FilterState::default();
    filters.apply(FilterUpdate::Query("dune".to_string()));
    filters.apply(FilterUpdate::InStockOnly(true));

    let result = client.search(&filters.to_query()).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].title, "Dune");
    assert_eq!(result.items[0].price().display(), "₹349.00");

    let requests = service.requests();
    let params = &requests[0];
    assert_eq!(params["q"], "dune");
    assert_eq!(params["category"], "");
    assert_eq!(params["price_max"], "2000");
    assert_eq!(params["author"], "");
    assert_eq!(params["in_stock"], "true");
    assert_eq!(params["sort"], "rating");
    assert_eq!(params["page"], "1");
}

#[tokio::test]
async fn test_search_pagination() {
    let service = MockCatalogService::start(shelf()).await;
    let client = client(&service);

    let mut filters = FilterState::default();
    filters.apply(FilterUpdate::Page(3));
    let result = client.search(&filters.to_query()).await.unwrap();

    assert_eq!(result.page, 3);
    assert_eq!(result.pages, 3);
    assert_eq!(result.total, 5);
    assert_eq!(result.items.len(), 1);
}

#[tokio::test]
async fn test_search_server_error() {
    let service = MockCatalogService::start(shelf()).await;
    let client = client(&service);

    let mut filters = FilterState::default();
    filters.apply(FilterUpdate::Query(FAILING_QUERY.to_string()));
    let err = client.search(&filters.to_query()).await.unwrap_err();

    assert!(matches!(err, CatalogError::Status(500)));
}

#[tokio::test]
async fn test_featured_takes_three_and_is_cached() {
    let service = MockCatalogService::start(shelf()).await;
    let client = client(&service);

    let first = client.featured().await.unwrap();
    let second = client.featured().await.unwrap();

    assert_eq!(first.len(), 2, "mock pages hold two items");
    assert_eq!(first, second);

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["sort"], "rating");
    assert_eq!(requests[0]["page"], "1");
}

#[tokio::test]
async fn test_add_to_cart_success() {
    let service = MockCatalogService::start(shelf()).await;
    let client = client(&service);
    let dune = Isbn::parse("9780441172719").unwrap();

    let first = client.add_to_cart(&AddToCartRequest::single(dune.clone())).await.unwrap();
    let second = client.add_to_cart(&AddToCartRequest::single(dune)).await.unwrap();

    assert_eq!(first, CartReply::Added { cart_count: 1 });
    assert_eq!(second, CartReply::Added { cart_count: 2 });
}

#[tokio::test]
async fn test_add_to_cart_rejected() {
    let service = MockCatalogService::start(shelf()).await;
    let client = client(&service);
    let foundation = Isbn::parse("9780553293357").unwrap();

    let err = client
        .add_to_cart(&AddToCartRequest::single(foundation))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::Rejected(ref m) if m == "Out of stock"));
}

#[tokio::test]
async fn test_add_to_cart_unauthorized_redirects() {
    let service = MockCatalogService::start(shelf()).await;
    let client = client(&service);
    let isbn = Isbn::parse(LOGIN_REQUIRED_ISBN).unwrap();

    let reply = client.add_to_cart(&AddToCartRequest::single(isbn)).await.unwrap();

    assert_eq!(reply, CartReply::Redirect("/login?next=/catalog".to_string()));
}

#[tokio::test]
async fn test_unreachable_service() {
    // Nothing listens on the discard port.
    let client = HttpCatalogClient::new(
        url::Url::parse("http://127.0.0.1:9").unwrap(),
        Duration::from_secs(60),
    );

    let err = client.featured().await.unwrap_err();
    assert!(matches!(err, CatalogError::Http(_)));
}
