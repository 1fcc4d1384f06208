//! Page controllers.
//!
//! Controllers hold the per-page state the presentation layer renders from
//! and orchestrate the catalog client. They carry no rendering concerns.

pub mod feed;
pub mod product;

pub use feed::{PageWindow, ReviewFeed};
pub use product::{Fetch, ProductPage, ReviewForm};
