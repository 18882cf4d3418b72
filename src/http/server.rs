//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, timeout)
//! - Apply the per-endpoint cross-origin policy
//! - Bind server to listener and serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::admin::setup_admin_router;
use crate::audit::AuditLogger;
use crate::auth::RoleVerifier;
use crate::config::GatewayConfig;
use crate::store::SubscriberStore;
use crate::subscribers::{subscribe_handler, unsubscribe_handler};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubscriberStore>,
    pub verifier: RoleVerifier,
    pub audit: AuditLogger,
}

/// HTTP server for the trust boundary endpoints.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and
    /// collaborators.
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn SubscriberStore>,
        verifier: RoleVerifier,
        audit: AuditLogger,
    ) -> Self {
        let state = AppState {
            store,
            verifier,
            audit,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        // Unsubscribe is self-authorizing via the token, so any origin
        // may call it.
        let unsubscribe_cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([
                AUTHORIZATION,
                CONTENT_TYPE,
                HeaderName::from_static("x-client-info"),
                HeaderName::from_static("apikey"),
            ]);

        // Intake is restricted to the production site. An unusable
        // configured origin leaves the route without CORS rather than
        // widening it.
        let mut intake_cors = CorsLayer::new()
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([
                AUTHORIZATION,
                CONTENT_TYPE,
                HeaderName::from_static("x-client-info"),
                HeaderName::from_static("apikey"),
                HeaderName::from_static("x-client-domain"),
            ]);
        match HeaderValue::try_from(config.cors.intake_origin.as_str()) {
            Ok(origin) => {
                intake_cors = intake_cors.allow_origin(origin);
            }
            Err(_) => {
                tracing::error!(
                    origin = %config.cors.intake_origin,
                    "intake origin not usable in a header, intake CORS disabled"
                );
            }
        }

        let public = Router::new()
            .route("/subscribe", post(subscribe_handler).layer(intake_cors))
            .route(
                "/unsubscribe",
                post(unsubscribe_handler).layer(unsubscribe_cors),
            )
            .with_state(state.clone());

        public
            .merge(setup_admin_router(state))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
