//! Authorization subsystem.
//!
//! # Design Decisions
//! - Roles are re-verified against the trusted authority on every
//!   privileged operation; client-cached claims drive nothing here
//! - Fail closed: connectivity loss, error responses, and absent
//!   sessions all evaluate to "not authorized"
//! - Underlying causes stay in the logs, never in the decision

pub mod principal;
pub mod rest;
pub mod roles;

pub use principal::Principal;
pub use rest::RestAuthority;
pub use roles::{AuthorityError, RoleAuthority, RoleVerifier, ROLE_ADMIN};
