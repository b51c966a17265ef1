//! Core types for Storehive.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod slug;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use slug::{SlugError, StoreSlug};
