//! Anonymous network guards for the subscriber list.
//!
//! # Data Flow
//! ```text
//! POST /subscribe
//!     → intake.rs (parse, sanitize, duplicate check, insert)
//! POST /unsubscribe
//!     → unsubscribe.rs (parse, lookup, token compare, delete)
//! ```
//!
//! Both callers are anonymous; neither route consults the role
//! verifier. The unsubscribe token is the sole authorization factor.

pub mod intake;
pub mod token;
pub mod unsubscribe;

pub use intake::subscribe_handler;
pub use unsubscribe::unsubscribe_handler;
