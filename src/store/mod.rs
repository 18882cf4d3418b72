//! Subscriber persistence seam.
//!
//! # Responsibilities
//! - Define the only persistence operations this layer may issue:
//!   lookup by unique email, insert, delete by identifier
//! - Production store speaks the hosted database's REST interface
//! - In-memory store backs tests and local runs
//!
//! # Design Decisions
//! - Email uniqueness is enforced by the store, not by callers; the
//!   intake pre-check is an optimization, not the source of truth
//! - Store errors never carry into response bodies

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod rest;

pub use memory::MemorySubscriberStore;
pub use rest::RestSubscriberStore;

/// A stored newsletter recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    /// Shared secret proving the right to delete this row.
    pub unsubscribe_token: String,
    /// Assigned by the store on insert.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Errors from the subscriber store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email uniqueness constraint rejected an insert.
    #[error("subscriber already exists: {0}")]
    Conflict(String),

    /// The store could not be reached or returned a failure.
    #[error("subscriber store request failed: {0}")]
    Upstream(String),
}

/// Persistence operations available to the trust boundary.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Fetch the subscriber with exactly this email, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError>;

    /// Insert a new subscriber with the given unsubscribe token.
    async fn insert(&self, email: &str, unsubscribe_token: &str) -> Result<Subscriber, StoreError>;

    /// Delete a subscriber row by identifier. Deleting an absent row is
    /// not a failure.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}
