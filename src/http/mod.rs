//! HTTP protocol surface.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → server.rs (router assembly, CORS, limits, request ID)
//!     → request.rs (trust-relevant metadata capture)
//!     → guard handlers (subscribers::, admin::)
//!     → JSON envelope response
//! ```

pub mod request;
pub mod server;

pub use request::RequestContext;
pub use server::{AppState, HttpServer, X_REQUEST_ID};
