//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest`; the backend is the source of truth
//! - Response normalization (timestamp parsing, trusted-render marking) is
//!   centralized in the conversions module so every caller receives
//!   consistently typed data and no render path sees unvetted content
//! - In-memory caching via `moka` for product reads (5 minute TTL)
//! - Review writes are gated by the [`Session`](crate::session::Session):
//!   without a credential they fail locally with
//!   [`CatalogError::Unauthenticated`] and never touch the network
//!
//! # Example
//!
//! ```rust,ignore
//! use greengrocer_storefront::catalog::CatalogClient;
//! use greengrocer_storefront::session::Session;
//!
//! let client = CatalogClient::new(&config, Session::from_config(&config));
//!
//! // Get a product
//! let product = client.get_product("heirloom-tomatoes").await?;
//!
//! // First page of its reviews
//! let reviews = client.list_reviews(&product.id, Some(0), Some(10)).await?;
//! ```

mod cache;
mod client;
mod conversions;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for diagnostics.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A wire timestamp could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An auth-gated operation was attempted without a credential. No
    /// request is issued in this case.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A local constraint was unmet; the request was never sent.
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("product: heirloom-tomatoes".to_string());
        assert_eq!(err.to_string(), "Not found: product: heirloom-tomatoes");

        let err = CatalogError::Unauthenticated;
        assert_eq!(err.to_string(), "Not authenticated");

        let err = CatalogError::Validation("score is required".to_string());
        assert_eq!(err.to_string(), "Validation error: score is required");
    }

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 502: bad gateway");
    }
}
