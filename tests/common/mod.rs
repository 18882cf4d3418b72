//! Shared fixtures for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::net::TcpListener;
use uuid::Uuid;

use newsletter_gateway::audit::{AuditError, AuditLogger, AuditSink, SecurityEvent};
use newsletter_gateway::auth::{AuthorityError, Principal, RoleAuthority, RoleVerifier, ROLE_ADMIN};
use newsletter_gateway::config::GatewayConfig;
use newsletter_gateway::http::HttpServer;
use newsletter_gateway::store::MemorySubscriberStore;

pub const INTAKE_ORIGIN: &str = "https://news.example.com";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const MEMBER_TOKEN: &str = "member-token";

/// Authority double: one admin session, one member session, and an
/// optional hard failure mode.
pub struct StubAuthority {
    pub admin_id: Uuid,
    pub member_id: Uuid,
    pub fail: bool,
}

impl Default for StubAuthority {
    fn default() -> Self {
        Self {
            admin_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            fail: false,
        }
    }
}

#[async_trait]
impl RoleAuthority for StubAuthority {
    async fn principal_from_token(
        &self,
        bearer: &str,
    ) -> Result<Option<Principal>, AuthorityError> {
        if self.fail {
            return Err(AuthorityError::Upstream(String::from("authority offline")));
        }
        match bearer {
            ADMIN_TOKEN => Ok(Some(Principal {
                id: self.admin_id,
                email: Some(String::from("admin@example.com")),
            })),
            MEMBER_TOKEN => Ok(Some(Principal {
                id: self.member_id,
                email: None,
            })),
            _ => Ok(None),
        }
    }

    async fn has_role(&self, principal_id: Uuid, role: &str) -> Result<bool, AuthorityError> {
        if self.fail {
            return Err(AuthorityError::Upstream(String::from("authority offline")));
        }
        Ok(role == ROLE_ADMIN && principal_id == self.admin_id)
    }
}

/// Audit double that records every event it is given.
#[derive(Default)]
pub struct RecordingAuditSink {
    pub events: Mutex<Vec<SecurityEvent>>,
}

impl RecordingAuditSink {
    pub fn actions(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.action.clone())
            .collect()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(
        &self,
        event: SecurityEvent,
        _bearer: Option<String>,
    ) -> Result<(), AuditError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

pub struct TestGateway {
    pub addr: SocketAddr,
    pub store: MemorySubscriberStore,
    pub audit: Arc<RecordingAuditSink>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Bind the real router on an ephemeral port against in-process doubles.
pub async fn spawn_gateway(authority: StubAuthority) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.cors.intake_origin = INTAKE_ORIGIN.to_string();

    let store = MemorySubscriberStore::new();
    let sink = Arc::new(RecordingAuditSink::default());
    let verifier = RoleVerifier::new(Arc::new(authority));
    let audit = AuditLogger::new(sink.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, Arc::new(store.clone()), verifier, audit);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    TestGateway {
        addr,
        store,
        audit: sink,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
