//! Admin authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::GatewayError;
use crate::http::request::RequestContext;
use crate::http::server::AppState;

/// Gate for the admin route group.
///
/// Resolves the caller's principal and re-verifies the admin role
/// against the authority on every request; client-cached role claims
/// are never consulted. Any failure along the way denies access.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let ctx = RequestContext::from_headers(request.headers());

    let principal = match state.verifier.current_principal(ctx.bearer.as_deref()).await {
        Some(principal) => principal,
        None => {
            state.audit.log_event("admin.access_denied", None, None, &ctx);
            return Err(GatewayError::Unauthorized(String::from("Not authorized")));
        }
    };

    if !state.verifier.is_admin(&principal).await {
        tracing::warn!(principal = %principal.id, "admin role check denied");
        state.audit.log_event("admin.access_denied", None, None, &ctx);
        return Err(GatewayError::Unauthorized(String::from("Not authorized")));
    }

    request.extensions_mut().insert(principal);
    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
