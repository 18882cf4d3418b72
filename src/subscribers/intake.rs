//! Subscriber intake guard.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::GatewayError;
use crate::http::request::RequestContext;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::sanitize::sanitize_email;
use crate::store::StoreError;

use super::token::generate_unsubscribe_token;

#[derive(Deserialize)]
struct IntakeRequest {
    email: Option<String>,
}

/// `POST /subscribe`
pub async fn subscribe_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::from_headers(&headers);
    let response = match intake(&state, &ctx, &body).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("subscribe", response.status().as_u16());
    response
}

async fn intake(
    state: &AppState,
    ctx: &RequestContext,
    body: &Bytes,
) -> Result<Response, GatewayError> {
    let request: IntakeRequest = serde_json::from_slice(body).map_err(|_| {
        GatewayError::BadRequest(String::from("Email is required and must be a string"))
    })?;
    let raw = request.email.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(GatewayError::BadRequest(String::from(
            "Email is required and must be a string",
        )));
    }

    let email = sanitize_email(&raw).map_err(|e| {
        metrics::record_sanitizer_rejection(e.kind());
        GatewayError::BadRequest(e.to_string())
    })?;

    let existing = state.store.find_by_email(&email).await.map_err(|e| {
        tracing::error!(error = %e, "subscriber lookup failed");
        GatewayError::Upstream(String::from("Failed to create subscriber"))
    })?;
    if existing.is_some() {
        return Err(GatewayError::Conflict(String::from("Email already exists")));
    }

    let token = generate_unsubscribe_token();
    let subscriber = match state.store.insert(&email, &token).await {
        Ok(row) => row,
        Err(StoreError::Conflict(_)) => {
            // lost the race to a concurrent intake; the store's
            // uniqueness constraint is the source of truth
            tracing::warn!(email = %email, "insert lost uniqueness race");
            return Err(GatewayError::Upstream(String::from(
                "Failed to create subscriber",
            )));
        }
        Err(e) => {
            tracing::error!(error = %e, "subscriber insert failed");
            return Err(GatewayError::Upstream(String::from(
                "Failed to create subscriber",
            )));
        }
    };

    tracing::info!(subscriber = %subscriber.id, "subscriber created");
    state.audit.log_event(
        "subscriber.create",
        Some("subscriber"),
        Some(&subscriber.id.to_string()),
        ctx,
    );

    Ok(Json(json!({ "success": true, "subscriber": subscriber })).into_response())
}
