//! Wire-to-domain conversion for catalog responses.
//!
//! Normalization lives here so every caller receives consistently typed
//! data: timestamps are parsed exactly once and rich-text content is marked
//! trusted-for-render at exactly one place. Doing this per-caller would risk
//! double parsing or an unvetted render path.

use chrono::{DateTime, Utc};
use greengrocer_core::{Price, ProductId, RichText};

use super::CatalogError;
use super::types::{Product, WireProduct};

/// Convert a wire product into its normalized domain form.
pub(crate) fn convert_product(wire: WireProduct) -> Result<Product, CatalogError> {
    Ok(Product {
        id: ProductId::new(wire.id),
        slug: wire.slug,
        title: wire.title,
        content: RichText::from(wire.content).trust(),
        price: Price::new(wire.price),
        stock: wire.stock,
        created: parse_timestamp(&wire.created)?,
        modified: parse_timestamp(&wire.modified)?,
        total_reviews: wire.total_reviews,
    })
}

/// Convert a wire product listing, normalizing every entry.
pub(crate) fn convert_products(wire: Vec<WireProduct>) -> Result<Vec<Product>, CatalogError> {
    wire.into_iter().map(convert_product).collect()
}

/// Parse an RFC 3339 wire timestamp into a UTC datetime.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CatalogError> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
