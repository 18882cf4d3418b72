//! REST-backed role authority client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::config::UpstreamConfig;

use super::principal::Principal;
use super::roles::{AuthorityError, RoleAuthority};

/// Client for the hosted platform's auth API and role-check RPC.
pub struct RestAuthority {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestAuthority {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AuthorityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthorityError::Upstream(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }
}

#[async_trait]
impl RoleAuthority for RestAuthority {
    async fn principal_from_token(
        &self,
        bearer: &str,
    ) -> Result<Option<Principal>, AuthorityError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| AuthorityError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let principal: Principal = response
                    .json()
                    .await
                    .map_err(|e| AuthorityError::Upstream(e.to_string()))?;
                Ok(Some(principal))
            }
            status => Err(AuthorityError::Upstream(format!(
                "session lookup returned {status}"
            ))),
        }
    }

    async fn has_role(&self, principal_id: Uuid, role: &str) -> Result<bool, AuthorityError> {
        let response = self
            .client
            .post(format!("{}/rest/v1/rpc/has_role", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&json!({
                "_user_id": principal_id,
                "_role": role,
            }))
            .send()
            .await
            .map_err(|e| AuthorityError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthorityError::Upstream(format!(
                "role check returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AuthorityError::Upstream(e.to_string()))
    }
}
