//! Admin handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::Principal;
use crate::error::GatewayError;
use crate::http::request::RequestContext;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::sanitize::{sanitize_markup, sanitize_subject};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

#[derive(Deserialize)]
struct PrepareNewsletterRequest {
    #[serde(default)]
    subject: String,
    #[serde(default)]
    html_content: String,
}

/// `POST /admin/newsletters/prepare`
///
/// Sanitizes a newsletter draft so the composition collaborator only
/// ever persists allow-listed content.
pub async fn prepare_newsletter(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(ctx): Extension<RequestContext>,
    body: Bytes,
) -> Response {
    let response = match prepare(&state, &principal, &ctx, &body) {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("admin_prepare", response.status().as_u16());
    response
}

fn prepare(
    state: &AppState,
    principal: &Principal,
    ctx: &RequestContext,
    body: &Bytes,
) -> Result<Response, GatewayError> {
    let request: PrepareNewsletterRequest = serde_json::from_slice(body)
        .map_err(|_| GatewayError::BadRequest(String::from("Invalid request body")))?;

    let subject = sanitize_subject(&request.subject).map_err(|e| {
        metrics::record_sanitizer_rejection(e.kind());
        GatewayError::BadRequest(e.to_string())
    })?;
    let html_content = sanitize_markup(&request.html_content);

    tracing::info!(principal = %principal.id, "newsletter draft sanitized");
    state
        .audit
        .log_event("newsletter.prepare", Some("newsletter"), None, ctx);

    Ok(Json(json!({
        "success": true,
        "subject": subject,
        "html_content": html_content,
    }))
    .into_response())
}
