//! Greengrocer storefront CLI.
//!
//! Drives the catalog client and product page controller end to end against
//! the configured backend: with a slug argument it opens that product's
//! detail page; without one it lists the catalog.
//!
//! # Configuration
//!
//! See [`config::StorefrontConfig`] for the environment variables read at
//! startup. The optional `STOREFRONT_ACCESS_TOKEN` enables the review
//! eligibility check and submission path.

#![cfg_attr(not(test), forbid(unsafe_code))]

use greengrocer_storefront::catalog::CatalogClient;
use greengrocer_storefront::config::StorefrontConfig;
use greengrocer_storefront::pages::{Fetch, ProductPage};
use greengrocer_storefront::session::Session;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "greengrocer_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let session = Session::from_config(&config);
    tracing::info!(authenticated = session.is_authenticated(), "session ready");

    let client = CatalogClient::new(&config, session);

    match std::env::args().nth(1) {
        Some(slug) => show_product(client, &slug, config.review_page_size).await,
        None => list_catalog(client).await,
    }
}

/// Open a product detail page and report its state.
async fn show_product(client: CatalogClient, slug: &str, page_size: u32) {
    let page = ProductPage::open(client, slug, page_size).await;

    match page.product() {
        Fetch::Ready(product) => {
            tracing::info!(
                title = %product.title,
                price = %product.price,
                stock = product.stock,
                total_reviews = product.total_reviews,
                "product loaded"
            );
        }
        Fetch::Failed(e) => {
            tracing::error!(error = %e, slug, "product failed to load");
            return;
        }
        // `open` settles the product fetch before returning
        Fetch::Pending => return,
    }

    match page.review_allowed() {
        Fetch::Ready(allowed) => tracing::info!(allowed, "review eligibility"),
        Fetch::Failed(e) => tracing::warn!(error = %e, "review eligibility unavailable"),
        Fetch::Pending => {}
    }

    if let Fetch::Ready(count) = page.review_count() {
        tracing::info!(count, "review count");
    }

    for review in page.shown_reviews() {
        tracing::info!(id = %review.id, score = review.score, body = %review.review, "review");
    }
}

/// List the unpaged default collection and the catalog size.
async fn list_catalog(client: CatalogClient) {
    match client.list_products(None, None).await {
        Ok(products) => {
            for product in &products {
                tracing::info!(slug = %product.slug, title = %product.title, price = %product.price, "product");
            }
        }
        Err(e) => tracing::error!(error = %e, "failed to list products"),
    }

    match client.product_count().await {
        Ok(count) => tracing::info!(count, "catalog size"),
        Err(e) => tracing::error!(error = %e, "failed to count products"),
    }
}
