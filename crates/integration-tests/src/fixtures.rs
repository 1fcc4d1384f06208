//! Wire-shaped JSON fixtures for the mock backend.
//!
//! Fixtures are built in the backend's wire shape (string timestamps,
//! `totalReviews`) so the client's normalization path is exercised for real.

use serde_json::{Value, json};
use uuid::Uuid;

/// A wire-shaped product document.
#[must_use]
pub fn product(id: &str, slug: &str, title: &str, total_reviews: u64) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": title,
        "content": format!("<p>{title}</p>"),
        "price": "4.99",
        "stock": 12,
        "created": "2024-03-01T09:30:00Z",
        "modified": "2024-03-02T10:00:00Z",
        "totalReviews": total_reviews,
    })
}

/// A wire-shaped review document with a server-assigned (random) ID.
#[must_use]
pub fn review(product_id: &str, score: u8, body: &str) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "product": product_id,
        "score": score,
        "review": body,
    })
}

/// `count` wire-shaped reviews for one product.
#[must_use]
pub fn reviews(product_id: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| review(product_id, 1 + (i % 5) as u8, &format!("review {i}")))
        .collect()
}
