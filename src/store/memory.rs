//! In-memory subscriber store for tests and local runs.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use super::{StoreError, Subscriber, SubscriberStore};

/// A thread-safe map of email to subscriber row.
#[derive(Clone, Default)]
pub struct MemorySubscriberStore {
    inner: Arc<DashMap<String, Subscriber>>,
}

impl MemorySubscriberStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored subscribers.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        Ok(self.inner.get(email).map(|row| row.value().clone()))
    }

    async fn insert(&self, email: &str, unsubscribe_token: &str) -> Result<Subscriber, StoreError> {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
            .to_string();
        let row = Subscriber {
            id: Uuid::new_v4(),
            email: email.to_string(),
            unsubscribe_token: unsubscribe_token.to_string(),
            created_at: Some(created_at),
        };
        // entry keeps the check-and-insert atomic under concurrent intakes
        match self.inner.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(email.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(row.clone());
                Ok(row)
            }
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let key = self
            .inner
            .iter()
            .find(|row| row.value().id == id)
            .map(|row| row.key().clone());
        if let Some(key) = key {
            self.inner.remove(&key);
        }
        Ok(())
    }
}
