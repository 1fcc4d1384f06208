//! End-to-end tests of the product page controller against the mock backend.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::Ordering;

use greengrocer_core::ReviewId;
use greengrocer_integration_tests::fixtures;
use greengrocer_integration_tests::mock::MockCatalog;
use greengrocer_storefront::catalog::{CatalogClient, CatalogError};
use greengrocer_storefront::pages::{Fetch, ProductPage, ReviewForm};
use greengrocer_storefront::session::Session;

const PAGE_SIZE: u32 = 10;

fn catalog_with_reviews(review_count: usize) -> (Vec<serde_json::Value>, Vec<serde_json::Value>) {
    let products = vec![fixtures::product(
        "p1",
        "heirloom-tomatoes",
        "Heirloom Tomatoes",
        review_count as u64,
    )];
    let reviews = fixtures::reviews("p1", review_count);
    (products, reviews)
}

fn fixture_review_id(reviews: &[serde_json::Value], index: usize) -> ReviewId {
    ReviewId::new(reviews[index]["id"].as_str().unwrap())
}

#[tokio::test]
async fn open_loads_product_then_satellite_fetches() {
    let (products, reviews) = catalog_with_reviews(25);
    let mock = MockCatalog::spawn(products, reviews).await;
    let client = CatalogClient::new(&mock.config(), mock.session());

    let page = ProductPage::open(client, "heirloom-tomatoes", PAGE_SIZE).await;

    let product = page.product().ready().expect("product loaded");
    assert_eq!(product.title, "Heirloom Tomatoes");
    assert!(product.content.is_trusted());

    assert!(matches!(page.review_allowed(), Fetch::Ready(true)));
    assert!(matches!(page.review_count(), Fetch::Ready(25)));
    assert!(matches!(page.reviews(), Fetch::Ready(())));

    // First page of reviews accumulated, window at page 0
    assert_eq!(page.shown_reviews().len(), 10);
    assert_eq!(page.feed().len(), 10);

    // One request per fetch: product, eligibility, count, first page
    assert_eq!(mock.hits().product.load(Ordering::SeqCst), 1);
    assert_eq!(mock.hits().review_allowed.load(Ordering::SeqCst), 1);
    assert_eq!(mock.hits().review_count.load(Ordering::SeqCst), 1);
    assert_eq!(mock.hits().reviews.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn open_with_unknown_slug_is_terminal_without_followups() {
    let (products, reviews) = catalog_with_reviews(5);
    let mock = MockCatalog::spawn(products, reviews).await;
    let client = CatalogClient::new(&mock.config(), mock.session());

    let page = ProductPage::open(client, "no-such-slug", PAGE_SIZE).await;

    assert!(matches!(
        page.product(),
        Fetch::Failed(CatalogError::NotFound(_))
    ));
    assert!(page.product().is_settled());
    assert!(page.shown_reviews().is_empty());

    // No satellite request was fired
    assert_eq!(mock.hits().review_allowed.load(Ordering::SeqCst), 0);
    assert_eq!(mock.hits().review_count.load(Ordering::SeqCst), 0);
    assert_eq!(mock.hits().reviews.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn open_anonymous_degrades_only_the_eligibility_fetch() {
    let (products, reviews) = catalog_with_reviews(5);
    let mock = MockCatalog::spawn(products, reviews).await;
    let client = CatalogClient::new(&mock.config(), Session::anonymous());

    let mut page = ProductPage::open(client, "heirloom-tomatoes", PAGE_SIZE).await;

    assert!(page.product().ready().is_some());
    assert!(matches!(page.review_count(), Fetch::Ready(5)));
    assert_eq!(page.shown_reviews().len(), 5);

    // Eligibility failed locally; its route was never hit
    assert!(matches!(
        page.review_allowed(),
        Fetch::Failed(CatalogError::Unauthenticated)
    ));
    assert_eq!(mock.hits().review_allowed.load(Ordering::SeqCst), 0);

    // Submission is refused before any request
    let form = ReviewForm {
        score: Some(5),
        review: String::new(),
    };
    let result = page.submit_review(form).await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));
    assert_eq!(mock.hits().submit_review.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn pagination_accumulates_and_serves_backward_moves_locally() {
    let (products, reviews) = catalog_with_reviews(25);
    let mock = MockCatalog::spawn(products, reviews.clone()).await;
    let client = CatalogClient::new(&mock.config(), mock.session());

    let mut page = ProductPage::open(client, "heirloom-tomatoes", PAGE_SIZE).await;
    assert_eq!(page.feed().len(), 10);

    // Forward: fetches page 1 and appends
    page.goto_page(1).await.unwrap();
    assert_eq!(page.feed().len(), 20);
    assert_eq!(page.shown_reviews().len(), 10);
    assert_eq!(page.shown_reviews()[0].id, fixture_review_id(&reviews, 10));
    assert_eq!(mock.hits().reviews.load(Ordering::SeqCst), 2);

    // Backward: served from the buffer, no request
    page.goto_page(0).await.unwrap();
    assert_eq!(page.shown_reviews()[0].id, fixture_review_id(&reviews, 0));
    assert_eq!(mock.hits().reviews.load(Ordering::SeqCst), 2);

    // Next page from 0 is already covered too
    page.next_page().await.unwrap();
    assert_eq!(page.shown_reviews()[0].id, fixture_review_id(&reviews, 10));
    assert_eq!(mock.hits().reviews.load(Ordering::SeqCst), 2);

    // Jump past the covered range: intervening pages fetched in order
    page.goto_page(2).await.unwrap();
    assert_eq!(mock.hits().reviews.load(Ordering::SeqCst), 3);

    // Accumulated length is the sum of all fetched page lengths
    assert_eq!(page.feed().len(), 25);
    assert_eq!(page.feed().pages_fetched(), 3);
    assert_eq!(page.shown_reviews().len(), 5);
}

#[tokio::test]
async fn submit_without_score_sends_nothing_and_changes_nothing() {
    let (products, reviews) = catalog_with_reviews(5);
    let mock = MockCatalog::spawn(products, reviews).await;
    let client = CatalogClient::new(&mock.config(), mock.session());

    let mut page = ProductPage::open(client, "heirloom-tomatoes", PAGE_SIZE).await;
    let shown_before: Vec<ReviewId> = page.shown_reviews().iter().map(|r| r.id.clone()).collect();

    let form = ReviewForm {
        score: None,
        review: "forgot the stars".to_string(),
    };
    let result = page.submit_review(form).await;

    assert!(matches!(result, Err(CatalogError::Validation(_))));
    assert_eq!(mock.hits().submit_review.load(Ordering::SeqCst), 0);

    let shown_after: Vec<ReviewId> = page.shown_reviews().iter().map(|r| r.id.clone()).collect();
    assert_eq!(shown_after, shown_before);
    assert!(matches!(page.review_count(), Fetch::Ready(5)));
}

#[tokio::test]
async fn successful_submission_prepends_and_increments_counts() {
    let (products, reviews) = catalog_with_reviews(5);
    let mock = MockCatalog::spawn(products, reviews).await;
    let client = CatalogClient::new(&mock.config(), mock.session());

    let mut page = ProductPage::open(client, "heirloom-tomatoes", PAGE_SIZE).await;
    let total_before = page.product().ready().unwrap().total_reviews;

    let form = ReviewForm {
        score: Some(5),
        review: "Best tomatoes all summer".to_string(),
    };
    let review_id = page.submit_review(form).await.unwrap();

    // The server assigned the ID; the new review leads the visible list
    assert_eq!(review_id, ReviewId::new("r1"));
    assert_eq!(page.shown_reviews()[0].id, review_id);
    assert_eq!(page.shown_reviews()[0].review, "Best tomatoes all summer");

    // Counters move by exactly one
    let product = page.product().ready().unwrap();
    assert_eq!(product.total_reviews, total_before + 1);
    assert!(matches!(page.review_count(), Fetch::Ready(6)));
}
