//! Product detail page controller.
//!
//! [`ProductPage::open`] resolves the whole initial load: the product fetch,
//! then the eligibility, review-count, and first-review-page fetches fired
//! concurrently. While the future is pending the page is loading; once it
//! resolves every fetch is settled, so a spinner can simply await `open`.
//! Each fetch keeps its own [`Fetch`] outcome rather than collapsing into a
//! single loaded flag, leaving render decisions to the presentation layer.

use greengrocer_core::{ProductId, ReviewId};
use tracing::{debug, instrument};

use crate::catalog::types::{Product, Review, ReviewDraft};
use crate::catalog::{CatalogClient, CatalogError};

use super::feed::{PageWindow, ReviewFeed};

// =============================================================================
// Fetch
// =============================================================================

/// Outcome of a single fetch.
#[derive(Debug)]
pub enum Fetch<T> {
    /// Not attempted (or superseded before completion).
    Pending,
    /// Completed successfully.
    Ready(T),
    /// Failed; the cause is kept so the presentation layer can decide how
    /// to render it.
    Failed(CatalogError),
}

impl<T> Fetch<T> {
    /// Whether the fetch has completed, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The value, if the fetch completed successfully.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending | Self::Failed(_) => None,
        }
    }
}

impl<T> From<Result<T, CatalogError>> for Fetch<T> {
    fn from(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e),
        }
    }
}

// =============================================================================
// ReviewForm
// =============================================================================

/// Review form state. The score is required; the text body is optional.
#[derive(Debug, Clone, Default)]
pub struct ReviewForm {
    /// Numeric score, set once the customer picks a rating.
    pub score: Option<u8>,
    /// Free-text review body.
    pub review: String,
}

impl ReviewForm {
    /// Validate the form into a submittable draft for `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when no score is set.
    fn into_draft(self, product: ProductId) -> Result<ReviewDraft, CatalogError> {
        let score = self
            .score
            .ok_or_else(|| CatalogError::Validation("score is required".to_string()))?;

        Ok(ReviewDraft {
            product,
            score,
            review: self.review,
        })
    }
}

// =============================================================================
// ProductPage
// =============================================================================

/// State for the product detail page.
///
/// Holds the product snapshot, review eligibility, the optimistic review
/// count, and the accumulated review feed. All state transitions go through
/// the methods here; the presentation layer only reads.
pub struct ProductPage {
    client: CatalogClient,
    product: Fetch<Product>,
    review_allowed: Fetch<bool>,
    review_count: Fetch<u64>,
    /// Outcome of the initial review-page fetch; the reviews themselves
    /// accumulate in `feed`.
    reviews: Fetch<()>,
    feed: ReviewFeed,
}

impl std::fmt::Debug for ProductPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductPage")
            .field("product", &self.product)
            .field("review_allowed", &self.review_allowed)
            .field("review_count", &self.review_count)
            .field("reviews", &self.reviews)
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}

impl ProductPage {
    /// Open the page for `slug`.
    ///
    /// Fetches the product first; on success the eligibility, review-count,
    /// and first-review-page fetches are fired concurrently (their
    /// completion order is undefined; they write to disjoint fields). On
    /// product-fetch failure the page is terminal: the cause is recorded
    /// and no follow-up request is issued.
    #[instrument(skip(client), fields(slug = %slug))]
    pub async fn open(client: CatalogClient, slug: &str, page_size: u32) -> Self {
        let mut page = Self {
            client,
            product: Fetch::Pending,
            review_allowed: Fetch::Pending,
            review_count: Fetch::Pending,
            reviews: Fetch::Pending,
            feed: ReviewFeed::new(page_size),
        };

        let product = match page.client.get_product(slug).await {
            Ok(product) => product,
            Err(e) => {
                debug!(error = %e, "product fetch failed, page is terminal");
                page.product = Fetch::Failed(e);
                return page;
            }
        };

        let window = page.feed.window();
        let (allowed, count, first_page) = tokio::join!(
            page.client.review_allowed(&product.id),
            page.client.review_count(&product.id),
            page.client
                .list_reviews(&product.id, Some(window.index), Some(window.size)),
        );

        page.review_allowed = allowed.into();
        page.review_count = count.into();
        match first_page {
            Ok(reviews) => {
                page.feed.append_page(reviews);
                page.reviews = Fetch::Ready(());
            }
            Err(e) => page.reviews = Fetch::Failed(e),
        }

        page.product = Fetch::Ready(product);
        page
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// The product fetch outcome.
    #[must_use]
    pub const fn product(&self) -> &Fetch<Product> {
        &self.product
    }

    /// The eligibility fetch outcome. Anything but `Ready(true)` means the
    /// review form should not be offered.
    #[must_use]
    pub const fn review_allowed(&self) -> &Fetch<bool> {
        &self.review_allowed
    }

    /// The review-count fetch outcome, incremented locally after a
    /// successful submission.
    #[must_use]
    pub const fn review_count(&self) -> &Fetch<u64> {
        &self.review_count
    }

    /// Outcome of the initial review-page fetch.
    #[must_use]
    pub const fn reviews(&self) -> &Fetch<()> {
        &self.reviews
    }

    /// The accumulated review feed.
    #[must_use]
    pub const fn feed(&self) -> &ReviewFeed {
        &self.feed
    }

    /// The reviews visible through the current window.
    #[must_use]
    pub fn shown_reviews(&self) -> &[Review] {
        self.feed.shown()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Move the review window to `page`, fetching any pages the buffer does
    /// not yet cover.
    ///
    /// Covered pages (including all backward moves) are served from the
    /// buffer without a request; moving past the covered range fetches the
    /// missing pages in order and appends each.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when no product is loaded, or
    /// the transport error of the first failing page fetch (pages fetched
    /// before the failure stay in the buffer).
    pub async fn goto_page(&mut self, page: u32) -> Result<(), CatalogError> {
        let Some(product) = self.product.ready() else {
            return Err(CatalogError::Validation(
                "no product loaded".to_string(),
            ));
        };
        let product_id = product.id.clone();
        let size = self.feed.window().size;

        while !self.feed.covers(page) {
            let next = self.feed.pages_fetched();
            let reviews = self
                .client
                .list_reviews(&product_id, Some(next), Some(size))
                .await?;
            self.feed.append_page(reviews);
        }

        self.feed.set_window(PageWindow::new(page, size));
        Ok(())
    }

    /// Move the review window to the next page.
    ///
    /// # Errors
    ///
    /// Same as [`goto_page`](Self::goto_page).
    pub async fn next_page(&mut self) -> Result<(), CatalogError> {
        self.goto_page(self.feed.window().index + 1).await
    }

    /// Validate and submit a review for the current product.
    ///
    /// A draft without a score is rejected locally; no request is sent.
    /// Submission also requires that eligibility resolved to `Ready(true)`.
    /// On success the persisted review is prepended to the feed
    /// (most-recent-first) and both the product's review counter and the
    /// optimistic review count increment by exactly one.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Validation`] for local constraint failures,
    /// [`CatalogError::Unauthenticated`] when the session carries no
    /// credential, or a transport error from the submission itself.
    pub async fn submit_review(&mut self, form: ReviewForm) -> Result<ReviewId, CatalogError> {
        let Some(product) = self.product.ready() else {
            return Err(CatalogError::Validation(
                "no product loaded".to_string(),
            ));
        };

        if !matches!(self.review_allowed, Fetch::Ready(true)) {
            return Err(CatalogError::Validation(
                "reviews are not allowed for this session".to_string(),
            ));
        }

        let draft = form.into_draft(product.id.clone())?;
        let review = self.client.submit_review(&draft).await?;
        let review_id = review.id.clone();

        self.feed.prepend(review);
        if let Fetch::Ready(product) = &mut self.product {
            product.total_reviews += 1;
        }
        if let Fetch::Ready(count) = &mut self.review_count {
            *count += 1;
        }

        debug!(review_id = %review_id, "review submitted and prepended");
        Ok(review_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_ready_accessor() {
        let fetch: Fetch<u64> = Fetch::Ready(7);
        assert!(fetch.is_settled());
        assert_eq!(fetch.ready(), Some(&7));

        let fetch: Fetch<u64> = Fetch::Pending;
        assert!(!fetch.is_settled());
        assert_eq!(fetch.ready(), None);

        let fetch: Fetch<u64> = Fetch::Failed(CatalogError::Unauthenticated);
        assert!(fetch.is_settled());
        assert_eq!(fetch.ready(), None);
    }

    #[test]
    fn test_form_without_score_fails_validation() {
        let form = ReviewForm {
            score: None,
            review: "nice".to_string(),
        };
        let result = form.into_draft(ProductId::new("p1"));
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_form_review_body_is_optional() {
        let form = ReviewForm {
            score: Some(5),
            review: String::new(),
        };
        let draft = form.into_draft(ProductId::new("p1")).unwrap();
        assert_eq!(draft.score, 5);
        assert_eq!(draft.review, "");
        assert_eq!(draft.product, ProductId::new("p1"));
    }
}
