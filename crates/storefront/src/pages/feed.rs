//! Append-only review accumulation with an explicit page window.
//!
//! Fetched review pages accumulate in a buffer that is only ever appended
//! to, so the buffer always covers pages `0..pages_fetched` and moving the
//! window backward is served locally, never by refetch. The visible window
//! is a separate descriptor over that buffer.

use crate::catalog::types::Review;

/// The visible window over the accumulated review buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Zero-based page index.
    pub index: u32,
    /// Reviews per page.
    pub size: u32,
}

impl PageWindow {
    /// Create a window at `index` with `size` reviews per page.
    #[must_use]
    pub const fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// The first window with `size` reviews per page.
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self::new(0, size)
    }
}

/// Append-only buffer of fetched review pages plus the visible window.
#[derive(Debug, Clone)]
pub struct ReviewFeed {
    buffer: Vec<Review>,
    window: PageWindow,
    pages_fetched: u32,
}

impl ReviewFeed {
    /// An empty feed with `size` reviews per page, window at page 0.
    #[must_use]
    pub const fn new(size: u32) -> Self {
        Self {
            buffer: Vec::new(),
            window: PageWindow::first(size),
            pages_fetched: 0,
        }
    }

    /// The current window.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.window
    }

    /// Number of pages appended so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Total accumulated reviews across all fetched pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no reviews have accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether `page` is already covered by the buffer.
    #[must_use]
    pub const fn covers(&self, page: u32) -> bool {
        page < self.pages_fetched
    }

    /// The reviews visible through the current window: at most
    /// `window.size` entries, starting at `window.index * window.size`.
    #[must_use]
    pub fn shown(&self) -> &[Review] {
        let size = self.window.size as usize;
        let start = (self.window.index as usize)
            .saturating_mul(size)
            .min(self.buffer.len());
        let end = start.saturating_add(size).min(self.buffer.len());
        self.buffer.get(start..end).unwrap_or(&[])
    }

    /// Append one fetched page. Nothing is replaced or deduplicated; an
    /// empty page still counts as fetched.
    pub fn append_page(&mut self, reviews: Vec<Review>) {
        self.buffer.extend(reviews);
        self.pages_fetched += 1;
    }

    /// Put a freshly persisted review at the front (most-recent-first).
    pub fn prepend(&mut self, review: Review) {
        self.buffer.insert(0, review);
    }

    /// Move the visible window.
    pub fn set_window(&mut self, window: PageWindow) {
        self.window = window;
    }
}
