//! Storehive storefront library.
//!
//! Resolves the tenant store for each request, renders its themed home page
//! and product pages, and serves its effective theme as JSON. Exposed as a
//! library so the binary, the CLI and tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod tenant;
pub mod theme;

#[cfg(test)]
mod test_support;
