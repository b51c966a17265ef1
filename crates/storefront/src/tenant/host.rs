//! Request host extraction and subdomain parsing.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::HOST, request::Parts},
};

use storehive_core::StoreSlug;

/// Extractor for the host the client addressed.
///
/// Prefers the URI authority (HTTP/2 `:authority`), then the `Host` header.
/// Never rejects; handlers decide what a missing host means.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequestHost(host): RequestHost) -> impl IntoResponse {
///     host.unwrap_or_default()
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost(pub Option<String>);

impl<S> FromRequestParts<S> for RequestHost
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let host = parts
            .uri
            .authority()
            .map(|a| a.as_str().to_owned())
            .or_else(|| {
                parts
                    .headers
                    .get(HOST)
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_owned)
            });

        Ok(Self(host))
    }
}

/// Extract the store slug from `host` if it is `{slug}.{base_domain}`.
///
/// The port and any trailing dot are ignored and the host is lower-cased
/// (DNS names are case-insensitive). Only a single label directly under the
/// base domain counts, and it must be a valid, non-reserved slug, so
/// `www.{base_domain}` and `a.b.{base_domain}` yield `None`.
#[must_use]
pub fn subdomain_slug(host: &str, base_domain: &str) -> Option<StoreSlug> {
    // Bracketed IPv6 literals never carry a subdomain
    if host.starts_with('[') {
        return None;
    }

    let hostname = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };
    let hostname = hostname.trim_end_matches('.').to_ascii_lowercase();

    let label = hostname
        .strip_suffix(base_domain)?
        .strip_suffix('.')?;

    if label.is_empty() || label.contains('.') {
        return None;
    }

    StoreSlug::parse(label).ok()
}
