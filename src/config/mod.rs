//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file
//!     → loader.rs (read, parse)
//!     → validation.rs (semantic checks, all errors at once)
//!     → GatewayConfig (schema.rs)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{GatewayConfig, UpstreamConfig};
