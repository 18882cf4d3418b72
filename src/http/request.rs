//! Request metadata extraction.
//!
//! # Responsibilities
//! - Capture trust-relevant request metadata once per request
//! - Extract the bearer token for session resolution
//! - Carry origin and client agent for audit records

use axum::http::{header, HeaderMap};

/// Trust-relevant request metadata. All fields are absent outside a
/// network context.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub bearer: Option<String>,
    pub origin: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            bearer: bearer_token(headers),
            origin: header_string(headers, header::ORIGIN),
            user_agent: header_string(headers, header::USER_AGENT),
        }
    }
}

/// Extract the bearer token from the Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
