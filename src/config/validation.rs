//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse and collaborator URLs are absolute
//! - Validate value ranges (timeouts > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function, run before config is accepted

use std::fmt;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use super::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn push(errors: &mut Vec<ValidationError>, field: &'static str, message: impl Into<String>) {
    errors.push(ValidationError {
        field,
        message: message.into(),
    });
}

fn is_http_url(value: &str) -> bool {
    matches!(Url::parse(value), Ok(url) if url.scheme() == "http" || url.scheme() == "https")
}

/// Validate semantic constraints on a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        push(
            &mut errors,
            "listener.bind_address",
            format!("not a valid socket address: {}", config.listener.bind_address),
        );
    }

    if !is_http_url(&config.upstream.base_url) {
        push(
            &mut errors,
            "upstream.base_url",
            format!("not an absolute http(s) URL: {}", config.upstream.base_url),
        );
    }
    if config.upstream.service_key.is_empty() {
        push(&mut errors, "upstream.service_key", "must not be empty");
    }
    if config.upstream.timeout_secs == 0 {
        push(&mut errors, "upstream.timeout_secs", "must be greater than zero");
    }

    // the intake origin ends up in a CORS response header verbatim
    if !is_http_url(&config.cors.intake_origin)
        || HeaderValue::try_from(config.cors.intake_origin.as_str()).is_err()
    {
        push(
            &mut errors,
            "cors.intake_origin",
            format!("not a usable origin: {}", config.cors.intake_origin),
        );
    }

    if config.timeouts.request_secs == 0 {
        push(&mut errors, "timeouts.request_secs", "must be greater than zero");
    }
    if config.security.max_body_size == 0 {
        push(&mut errors, "security.max_body_size", "must be greater than zero");
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        push(
            &mut errors,
            "observability.metrics_address",
            format!("not a valid socket address: {}", config.observability.metrics_address),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
