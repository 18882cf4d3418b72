//! The authenticated actor behind a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated actor, as resolved by the trusted authority from a
/// verified session token.
///
/// Deliberately carries no role flags: the authority is consulted per
/// privileged operation instead, since anything cached here would be
/// client-influenced state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}
