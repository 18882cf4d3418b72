//! Best-effort trail of security-relevant actions.
//!
//! # Design Decisions
//! - Fire and forget: emission runs on a detached task and can never
//!   block or fail the operation it observes
//! - Actor identity is resolved by the audit store from the caller's
//!   authenticated context, not supplied in the event
//! - Timestamps are assigned by the store

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::http::request::RequestContext;
use crate::observability::metrics;

pub mod rest;

pub use rest::RestAuditSink;

/// An immutable audit record. Created once per logged action.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityEvent {
    pub action: String,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub origin: Option<String>,
    pub user_agent: Option<String>,
}

/// Errors from the audit sink.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The sink could not be reached or rejected the event.
    #[error("audit sink request failed: {0}")]
    Upstream(String),
}

/// Destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one event. `bearer` is the caller's authenticated context;
    /// the store derives the actor from it, nullable for anonymous
    /// callers.
    async fn record(&self, event: SecurityEvent, bearer: Option<String>)
        -> Result<(), AuditError>;
}

/// Front door for audit emission.
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Record a security-relevant action.
    ///
    /// Dispatches on a detached task; sink failures are logged and
    /// counted, never returned to the caller.
    pub fn log_event(
        &self,
        action: &str,
        resource_type: Option<&str>,
        resource_id: Option<&str>,
        ctx: &RequestContext,
    ) {
        let event = SecurityEvent {
            action: action.to_string(),
            resource_type: resource_type.map(str::to_string),
            resource_id: resource_id.map(str::to_string),
            origin: ctx.origin.clone(),
            user_agent: ctx.user_agent.clone(),
        };
        let bearer = ctx.bearer.clone();
        let sink = self.sink.clone();
        tokio::spawn(async move {
            if let Err(e) = sink.record(event, bearer).await {
                metrics::record_audit_drop();
                tracing::warn!(error = %e, "audit event dropped");
            }
        });
    }
}
