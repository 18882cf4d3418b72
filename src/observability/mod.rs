//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured logging initialization
//! - Prometheus metrics exposition

pub mod logging;
pub mod metrics;
