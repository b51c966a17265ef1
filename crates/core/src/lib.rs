//! Storehive Core - Shared types library.
//!
//! This crate provides common types used across all Storehive components:
//! - `storefront` - Multi-tenant storefront server
//! - `cli` - Command-line tools for migrations, store provisioning and themes
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no database access,
//! no HTTP clients. This keeps it lightweight and allows the theme format to be
//! validated anywhere (server, CLI, tests).
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and store slugs
//! - [`theme`] - Theme configuration: branding plus typed page layouts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod theme;
pub mod types;

pub use theme::{Block, BlockKind, Layout, ThemeConfig};
pub use types::*;
