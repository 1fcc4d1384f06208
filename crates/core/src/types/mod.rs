//! Core types for Greengrocer.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod rich_text;
pub mod status;

pub use id::*;
pub use price::Price;
pub use rich_text::RichText;
pub use status::OrderStatus;
