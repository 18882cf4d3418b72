//! REST-backed subscriber store speaking the hosted database's
//! PostgREST-style interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::config::UpstreamConfig;

use super::{StoreError, Subscriber, SubscriberStore};

pub struct RestSubscriberStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestSubscriberStore {
    pub fn new(config: &UpstreamConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Upstream(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/subscribers", self.base_url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.service_key),
            )
    }
}

#[async_trait]
impl SubscriberStore for RestSubscriberStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[
                ("email", format!("eq.{email}")),
                ("limit", String::from("1")),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Upstream(format!(
                "lookup returned {}",
                response.status()
            )));
        }
        let mut rows: Vec<Subscriber> = response
            .json()
            .await
            .map_err(|e| StoreError::Upstream(e.to_string()))?;
        Ok(rows.pop())
    }

    async fn insert(&self, email: &str, unsubscribe_token: &str) -> Result<Subscriber, StoreError> {
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&json!({
                "email": email,
                "unsubscribe_token": unsubscribe_token,
            }))
            .send()
            .await
            .map_err(|e| StoreError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::CONFLICT => Err(StoreError::Conflict(email.to_string())),
            status if status.is_success() => {
                let mut rows: Vec<Subscriber> = response
                    .json()
                    .await
                    .map_err(|e| StoreError::Upstream(e.to_string()))?;
                rows.pop()
                    .ok_or_else(|| StoreError::Upstream(String::from("insert returned no row")))
            }
            status => Err(StoreError::Upstream(format!("insert returned {status}"))),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| StoreError::Upstream(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Upstream(format!(
                "delete returned {}",
                response.status()
            )))
        }
    }
}
