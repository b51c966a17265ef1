//! Domain models for storefront.
//!
//! These are validated domain objects, separate from the `sqlx` row types in
//! [`crate::db`].

pub mod product;
pub mod store;

pub use product::Product;
pub use store::Store;
