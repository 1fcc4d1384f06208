//! Cache types for catalog API responses.

use super::types::Product;

/// Cache key for product reads. Review data is never cached; it is mutable
/// state.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub(crate) enum CacheKey {
    /// A single product by slug.
    Product(String),
    /// A product listing page (or the unpaged default collection).
    Products {
        page: Option<u32>,
        size: Option<u32>,
    },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub(crate) enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
}
