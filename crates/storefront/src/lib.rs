//! Greengrocer storefront client library.
//!
//! This crate provides the storefront-side access layer for the Greengrocer
//! backend: a typed catalog client, an explicit customer session, and the
//! product page controller that orchestrates them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod pages;
pub mod session;
