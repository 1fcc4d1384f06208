//! Domain types for the catalog API.
//!
//! Wire shapes (what the backend actually sends) are private to this module
//! tree; everything public here is the normalized domain form.

use chrono::{DateTime, Utc};
use greengrocer_core::{OrderId, OrderStatus, Price, ProductId, ReviewId, RichText, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// A product in the catalog.
///
/// Snapshots are immutable per fetch; the only local mutation is the
/// `total_reviews` increment performed by the page controller after a
/// successful review submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned product ID.
    pub id: ProductId,
    /// URL slug used for lookup.
    pub slug: String,
    /// Product title.
    pub title: String,
    /// Rich-text description, marked trusted-for-render during
    /// normalization.
    pub content: RichText,
    /// Unit price.
    pub price: Price,
    /// Units in stock.
    pub stock: i64,
    /// Creation timestamp (parsed from the wire string).
    pub created: DateTime<Utc>,
    /// Last-modified timestamp (parsed from the wire string).
    pub modified: DateTime<Utc>,
    /// Review counter as of the fetch.
    pub total_reviews: u64,
}

/// Wire shape of a product as transmitted by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProduct {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub price: Decimal,
    pub stock: i64,
    pub created: String,
    pub modified: String,
    #[serde(default)]
    pub total_reviews: u64,
}

// =============================================================================
// Review Types
// =============================================================================

/// A persisted customer review.
///
/// Reviews always arrive from the backend with their server-assigned ID; an
/// unpersisted review is a [`ReviewDraft`], a distinct type, so the two
/// cannot be confused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Server-assigned review ID.
    pub id: ReviewId,
    /// The reviewed product.
    pub product: ProductId,
    /// Numeric score.
    pub score: u8,
    /// Free-text review body; may be empty.
    #[serde(default)]
    pub review: String,
}

/// A client-side review awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDraft {
    /// The product being reviewed; always the product currently shown.
    pub product: ProductId,
    /// Numeric score (required).
    pub score: u8,
    /// Free-text review body (optional, may be empty).
    pub review: String,
}

// =============================================================================
// Order Types
// =============================================================================

/// A customer order.
///
/// All fields are optional pre-submission; once placed, the order becomes an
/// immutable historical record on the backend. Included for data-model
/// completeness; the storefront performs no order operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend-assigned order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    /// Order lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    /// The ordering customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orderer: Option<UserId>,
    /// Products in the order.
    pub products: Vec<Product>,
    /// Billing and shipping addresses.
    pub addresses: OrderAddresses,
}

/// Billing and shipping address pair for an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderAddresses {
    /// Billing address.
    pub billing: Address,
    /// Shipping address.
    pub shipping: Address,
}

/// A postal address; every field is optional until the order is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_product_total_reviews_rename() {
        let wire: WireProduct = serde_json::from_str(
            r#"{
                "id": "p1",
                "slug": "heirloom-tomatoes",
                "title": "Heirloom Tomatoes",
                "content": "<p>Juicy.</p>",
                "price": "4.99",
                "stock": 12,
                "created": "2024-03-01T09:30:00Z",
                "modified": "2024-03-02T10:00:00Z",
                "totalReviews": 3
            }"#,
        )
        .unwrap();
        assert_eq!(wire.total_reviews, 3);
        assert_eq!(wire.slug, "heirloom-tomatoes");
    }

    #[test]
    fn test_review_body_defaults_to_empty() {
        let review: Review =
            serde_json::from_str(r#"{"id": "r1", "product": "p1", "score": 5}"#).unwrap();
        assert_eq!(review.review, "");
        assert_eq!(review.id, ReviewId::new("r1"));
    }

    #[test]
    fn test_draft_serializes_review_body() {
        let draft = ReviewDraft {
            product: ProductId::new("p1"),
            score: 4,
            review: "Crisp and fresh".to_string(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["product"], "p1");
        assert_eq!(json["score"], 4);
        assert_eq!(json["review"], "Crisp and fresh");
    }

    #[test]
    fn test_order_address_camel_case() {
        let order: Order = serde_json::from_str(
            r#"{
                "products": [],
                "addresses": {
                    "billing": {"phoneNumber": "555-0100"},
                    "shipping": {}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            order.addresses.billing.phone_number.as_deref(),
            Some("555-0100")
        );
        assert!(order.id.is_none());
    }
}
