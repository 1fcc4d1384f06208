//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP and caches product reads using `moka`
//! (5-minute TTL). Review reads and writes are never cached.

use std::sync::Arc;
use std::time::Duration;

use greengrocer_core::ProductId;
use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::StorefrontConfig;
use crate::session::Session;

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use super::conversions::{convert_product, convert_products};
use super::types::{Product, Review, ReviewDraft, WireProduct};

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the backend catalog API.
///
/// Provides typed, normalized access to products and reviews. Product reads
/// are cached for 5 minutes; the review write path is gated by the session
/// credential and never issues a request without one.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    /// Resolved `<api_base>/product/` prefix; endpoint paths append to it.
    base: String,
    session: Session,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client bound to one customer session.
    #[must_use]
    pub fn new(config: &StorefrontConfig, session: Session) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        // api_base always carries a trailing slash (normalized in config)
        let base = format!("{}product/", config.api_base);

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base,
                session,
                cache,
            }),
        }
    }

    /// The session this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Decode a response body, mapping non-success statuses to errors.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CatalogError> {
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(200).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(200).collect::<String>(),
                "failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a paginated list of products.
    ///
    /// `page` and `size` are appended as query parameters only when both are
    /// present; otherwise the unpaged default collection is requested. Every
    /// returned product is normalized: timestamps parsed, rich-text content
    /// marked trusted-for-render.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<Vec<Product>, CatalogError> {
        let cache_key = CacheKey::Products { page, size };

        // Check cache
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for products");
            return Ok(products);
        }

        let url = format!("{}products", self.inner.base);
        let mut request = self.inner.client.get(&url);
        if let (Some(page), Some(size)) = (page, size) {
            request = request.query(&[("page", page), ("size", size)]);
        }

        let response = request.send().await?;
        let wire: Vec<WireProduct> = Self::decode(response).await?;
        let products = convert_products(wire)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its slug.
    ///
    /// The slug is passed as a query parameter, not a path segment. The
    /// result is normalized like [`list_products`](Self::list_products).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product matches, another
    /// error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product(&self, slug: &str) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(slug.to_string());

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let url = format!("{}product", self.inner.base);
        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("slug", slug)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(format!("product not found: {slug}")));
        }

        let wire: WireProduct = Self::decode(response).await?;
        let product = convert_product(wire)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the total number of products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn product_count(&self) -> Result<u64, CatalogError> {
        let url = format!("{}products/count", self.inner.base);
        let response = self.inner.client.get(&url).send().await?;
        Self::decode(response).await
    }

    // =========================================================================
    // Review Methods (not cached - mutable state)
    // =========================================================================

    /// Get a page of reviews for a product. No normalization is applied.
    ///
    /// `page` and `size` follow the same both-or-neither contract as
    /// [`list_products`](Self::list_products).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product))]
    pub async fn list_reviews(
        &self,
        product: &ProductId,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<Vec<Review>, CatalogError> {
        let url = format!("{}product/{}/reviews", self.inner.base, product);
        let mut request = self.inner.client.get(&url);
        if let (Some(page), Some(size)) = (page, size) {
            request = request.query(&[("page", page), ("size", size)]);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Get the number of reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product))]
    pub async fn review_count(&self, product: &ProductId) -> Result<u64, CatalogError> {
        let url = format!("{}product/{}/reviews/count", self.inner.base, product);
        let response = self.inner.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Whether the current session may review this product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthenticated`] without issuing a request
    /// when the session is anonymous; another error if the request fails.
    #[instrument(skip(self), fields(product = %product))]
    pub async fn review_allowed(&self, product: &ProductId) -> Result<bool, CatalogError> {
        let token = self.inner.session.bearer()?;

        let url = format!("{}product/{}/reviewAllowed", self.inner.base, product);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Submit a review draft. On success the backend echoes the persisted
    /// review with its server-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthenticated`] without issuing a request
    /// when the session is anonymous; another error if the request fails.
    #[instrument(skip(self, draft), fields(product = %draft.product))]
    pub async fn submit_review(&self, draft: &ReviewDraft) -> Result<Review, CatalogError> {
        let token = self.inner.session.bearer()?;

        let url = format!("{}product/{}/reviews", self.inner.base, draft.product);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(draft)
            .send()
            .await?;

        let review: Review = Self::decode(response).await?;
        debug!(review_id = %review.id, "review persisted");
        Ok(review)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, slug: &str) {
        self.inner
            .cache
            .invalidate(&CacheKey::Product(slug.to_string()))
            .await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
