//! Tenant resolution.
//!
//! Every storefront request is served on behalf of exactly one store. The
//! store is identified either by the request host (`{slug}.{base_domain}`)
//! or by an explicit `/s/{slug}` path segment; see [`StoreResolver`].

pub mod host;
pub mod resolver;

pub use host::RequestHost;
pub use resolver::{ResolveError, ResolvedStore, StoreResolver, StoreSource};
