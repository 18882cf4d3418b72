//! Unsubscribe token guard.

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

#[derive(Deserialize)]
struct UnsubscribeRequest {
    email: Option<String>,
    token: Option<String>,
}

/// `POST /unsubscribe`
pub async fn unsubscribe_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::from_headers(&headers);
    let response = match unsubscribe(&state, &ctx, &body).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("unsubscribe", response.status().as_u16());
    response
}

async fn unsubscribe(
    state: &AppState,
    ctx: &RequestContext,
    body: &Bytes,
) -> Result<Response, GatewayError> {
    let request: UnsubscribeRequest = serde_json::from_slice(body)
        .map_err(|_| GatewayError::BadRequest(String::from("Email and token are required")))?;
    let (email, token) = match (request.email, request.token) {
        (Some(email), Some(token)) if !email.is_empty() && !token.is_empty() => (email, token),
        _ => {
            return Err(GatewayError::BadRequest(String::from(
                "Email and token are required",
            )))
        }
    };

    let subscriber = state
        .store
        .find_by_email(&email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "subscriber lookup failed");
            GatewayError::BadRequest(String::from("Failed to unsubscribe"))
        })?
        .ok_or_else(|| GatewayError::NotFound(String::from("Subscriber not found")))?;

    if subscriber.unsubscribe_token != token {
        tracing::warn!(subscriber = %subscriber.id, "unsubscribe token mismatch");
        return Err(GatewayError::InvalidToken);
    }

    if let Err(e) = state.store.delete_by_id(subscriber.id).await {
        tracing::error!(subscriber = %subscriber.id, error = %e, "subscriber delete failed");
        return Err(GatewayError::BadRequest(String::from("Failed to unsubscribe")));
    }

    tracing::info!(subscriber = %subscriber.id, "subscriber removed");
    state.audit.log_event(
        "subscriber.unsubscribe",
        Some("subscriber"),
        Some(&subscriber.id.to_string()),
        ctx,
    );

    Ok(Json(json!({ "success": true, "message": "Successfully unsubscribed" })).into_response())
}
