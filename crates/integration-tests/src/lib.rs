//! Integration tests for Greengrocer.
//!
//! Tests exercise the catalog client and product page controller end to end
//! against an in-process mock of the backend catalog API, bound to an
//! ephemeral local port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greengrocer-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_client` - Client operations, normalization, caching, auth gate
//! - `product_page` - Controller flow: initial load, pagination, submission

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;
pub mod mock;
