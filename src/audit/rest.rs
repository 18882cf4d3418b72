//! REST-backed audit sink posting to the platform's event RPC.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::config::UpstreamConfig;

use super::{AuditError, AuditSink, SecurityEvent};

pub struct RestAuditSink {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestAuditSink {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AuditError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuditError::Upstream(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }
}

#[async_trait]
impl AuditSink for RestAuditSink {
    async fn record(
        &self,
        event: SecurityEvent,
        bearer: Option<String>,
    ) -> Result<(), AuditError> {
        // The RPC runs under the caller's token when one exists, so the
        // store attributes the event itself; anonymous calls record a
        // null actor.
        let token = bearer.unwrap_or_else(|| self.service_key.clone());
        let response = self
            .client
            .post(format!("{}/rest/v1/rpc/log_security_event", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .json(&json!({
                "_action": event.action,
                "_resource_type": event.resource_type,
                "_resource_id": event.resource_id,
                "_origin": event.origin,
                "_user_agent": event.user_agent,
            }))
            .send()
            .await
            .map_err(|e| AuditError::Upstream(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuditError::Upstream(format!(
                "event insert returned {}",
                response.status()
            )))
        }
    }
}
