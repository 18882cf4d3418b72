//! Newsletter trust gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │              NEWSLETTER GATEWAY              │
//!                    │                                              │
//!  POST /subscribe   │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!  ──────────────────┼─▶│  http    │──▶│ sanitize │──▶│  store   │──┼──▶ hosted DB
//!  POST /unsubscribe │  │  server  │   │          │   │ (REST)   │  │
//!                    │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                    │       │                             │        │
//!  /admin/*          │       ▼                             ▼        │
//!  ──────────────────┼─▶ ┌──────────┐   ┌──────────┐  ┌──────────┐  │
//!   (bearer token)   │   │  admin   │──▶│   auth   │  │  audit   │──┼──▶ event RPC
//!                    │   │  guard   │   │ verifier │  │  (spawn) │  │
//!                    │   └──────────┘   └────┬─────┘  └──────────┘  │
//!                    │                       │                      │
//!                    └───────────────────────┼──────────────────────┘
//!                                            ▼
//!                                      role authority
//! ```
//!
//! Role checks always go to the authority; nothing trusts a
//! client-cached claim. Audit emission is detached and best-effort.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use newsletter_gateway::audit::{AuditLogger, RestAuditSink};
use newsletter_gateway::auth::{RestAuthority, RoleVerifier};
use newsletter_gateway::config::{load_config, GatewayConfig};
use newsletter_gateway::http::HttpServer;
use newsletter_gateway::observability::{logging, metrics};
use newsletter_gateway::store::RestSubscriberStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let store = Arc::new(RestSubscriberStore::new(&config.upstream)?);
    let authority = Arc::new(RestAuthority::new(&config.upstream)?);
    let audit = AuditLogger::new(Arc::new(RestAuditSink::new(&config.upstream)?));
    let verifier = RoleVerifier::new(authority);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config, store, verifier, audit);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
