//! Input sanitization.
//!
//! # Data Flow
//! ```text
//! Untrusted input:
//!     → markup.rs (allow-list markup cleaning, text extraction)
//!     → fields.rs (email and subject validation)
//!     → Safe to persist or render
//! ```
//!
//! # Design Decisions
//! - Allow-list based: everything not explicitly permitted is removed.
//!   The set of dangerous markup constructs is open-ended, so a deny
//!   list cannot be complete.
//! - Pure functions, recomputed on every call, no caching
//! - Empty input means "absent" and is never an error

pub mod fields;
pub mod markup;

pub use fields::{sanitize_email, sanitize_subject, SanitizeError, MAX_SUBJECT_CHARS};
pub use markup::{sanitize_markup, sanitize_text};
