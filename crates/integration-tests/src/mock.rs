//! In-process mock of the backend catalog API.
//!
//! Serves the same `product/` routes the real backend exposes, from
//! wire-shaped JSON fixtures. Every route counts its hits so tests can
//! assert not only what a client call returned but whether a request was
//! issued at all (the auth gate must refuse locally, with zero requests).

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use greengrocer_storefront::config::StorefrontConfig;
use greengrocer_storefront::session::Session;

/// Bearer token the mock backend accepts.
pub const TEST_TOKEN: &str = "it-bearer-9f2c47d1";

/// Per-route request counters.
#[derive(Debug, Default)]
pub struct RouteHits {
    pub products: AtomicUsize,
    pub product: AtomicUsize,
    pub product_count: AtomicUsize,
    pub reviews: AtomicUsize,
    pub review_count: AtomicUsize,
    pub review_allowed: AtomicUsize,
    pub submit_review: AtomicUsize,
}

struct MockInner {
    products: Vec<Value>,
    /// Reported by `products/count`; independent of the fixture list so
    /// tests can verify count and page fetches are unrelated.
    product_count: usize,
    reviews: Mutex<Vec<Value>>,
    /// Counter behind server-assigned IDs for submitted reviews
    /// (`r1`, `r2`, ...).
    submitted: AtomicUsize,
    hits: RouteHits,
}

#[derive(Clone)]
struct MockState(Arc<MockInner>);

/// A mock catalog backend bound to an ephemeral local port.
pub struct MockCatalog {
    /// Base URL of the mock, with trailing slash.
    pub base_url: String,
    state: MockState,
}

impl MockCatalog {
    /// Spawn a mock serving `products` and `reviews`; the product count
    /// reports the fixture list length.
    pub async fn spawn(products: Vec<Value>, reviews: Vec<Value>) -> Self {
        let count = products.len();
        Self::spawn_with_product_count(products, reviews, count).await
    }

    /// Spawn a mock whose `products/count` route reports `product_count`
    /// regardless of the fixture list.
    pub async fn spawn_with_product_count(
        products: Vec<Value>,
        reviews: Vec<Value>,
        product_count: usize,
    ) -> Self {
        let state = MockState(Arc::new(MockInner {
            products,
            product_count,
            reviews: Mutex::new(reviews),
            submitted: AtomicUsize::new(0),
            hits: RouteHits::default(),
        }));

        let app = Router::new()
            .route("/product/products", get(list_products))
            .route("/product/product", get(get_product))
            .route("/product/products/count", get(product_count_route))
            .route(
                "/product/product/{id}/reviews",
                get(list_reviews).post(submit_review),
            )
            .route("/product/product/{id}/reviews/count", get(review_count))
            .route("/product/product/{id}/reviewAllowed", get(review_allowed))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock listener address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    /// The per-route hit counters.
    #[must_use]
    pub fn hits(&self) -> &RouteHits {
        &self.state.0.hits
    }

    /// A storefront config pointing at this mock, with no access token.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            api_base: Url::parse(&self.base_url).expect("mock base URL"),
            access_token: None,
            review_page_size: 10,
        }
    }

    /// An authenticated session the mock accepts.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::with_token(SecretString::from(TEST_TOKEN.to_string()))
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<usize>,
    size: Option<usize>,
}

/// Slice `items` the way the backend paginates: both parameters or nothing.
fn paginate(items: &[Value], query: &PageQuery) -> Vec<Value> {
    match (query.page, query.size) {
        (Some(page), Some(size)) => items
            .iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect(),
        _ => items.to_vec(),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {TEST_TOKEN}").as_str())
}

async fn list_products(
    State(state): State<MockState>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<Value>> {
    state.0.hits.products.fetch_add(1, Ordering::SeqCst);
    Json(paginate(&state.0.products, &query))
}

#[derive(Debug, Deserialize)]
struct SlugQuery {
    slug: String,
}

async fn get_product(State(state): State<MockState>, Query(query): Query<SlugQuery>) -> Response {
    state.0.hits.product.fetch_add(1, Ordering::SeqCst);
    state
        .0
        .products
        .iter()
        .find(|p| p["slug"] == query.slug.as_str())
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |p| Json(p.clone()).into_response(),
        )
}

async fn product_count_route(State(state): State<MockState>) -> Json<usize> {
    state.0.hits.product_count.fetch_add(1, Ordering::SeqCst);
    Json(state.0.product_count)
}

fn reviews_for<'a>(reviews: &'a [Value], product_id: &str) -> Vec<&'a Value> {
    reviews
        .iter()
        .filter(|r| r["product"] == product_id)
        .collect()
}

async fn list_reviews(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<Value>> {
    state.0.hits.reviews.fetch_add(1, Ordering::SeqCst);
    let reviews = state.0.reviews.lock().expect("reviews lock");
    let matching: Vec<Value> = reviews_for(&reviews, &id).into_iter().cloned().collect();
    Json(paginate(&matching, &query))
}

async fn review_count(State(state): State<MockState>, Path(id): Path<String>) -> Json<usize> {
    state.0.hits.review_count.fetch_add(1, Ordering::SeqCst);
    let reviews = state.0.reviews.lock().expect("reviews lock");
    Json(reviews_for(&reviews, &id).len())
}

async fn review_allowed(
    State(state): State<MockState>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.0.hits.review_allowed.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(true).into_response()
}

async fn submit_review(
    State(state): State<MockState>,
    Path(_id): Path<String>,
    headers: HeaderMap,
    Json(draft): Json<Value>,
) -> Response {
    state.0.hits.submit_review.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let n = state.0.submitted.fetch_add(1, Ordering::SeqCst) + 1;
    let mut review = draft;
    review["id"] = json!(format!("r{n}"));
    state
        .0
        .reviews
        .lock()
        .expect("reviews lock")
        .insert(0, review.clone());

    Json(review).into_response()
}
