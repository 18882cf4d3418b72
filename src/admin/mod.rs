//! Admin surface.
//!
//! Every route in this group is gated by a server-verified role check.
//! Client-cached role flags may drive UI visibility elsewhere; they
//! gate nothing here.

pub mod auth;
pub mod handlers;

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::http::server::AppState;

use self::auth::admin_auth_middleware;
use self::handlers::{get_status, prepare_newsletter};

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/newsletters/prepare", post(prepare_newsletter))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}
