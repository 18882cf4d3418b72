//! Fail-closed role verification.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::principal::Principal;

/// Role checked for every privileged operation.
pub const ROLE_ADMIN: &str = "admin";

/// Errors from the role authority.
#[derive(Debug, Error)]
pub enum AuthorityError {
    /// The authority could not be reached or returned a failure.
    #[error("role authority request failed: {0}")]
    Upstream(String),
}

/// The trusted source of identity and role grants.
#[async_trait]
pub trait RoleAuthority: Send + Sync {
    /// Resolve a bearer token to its principal, if the session is valid.
    async fn principal_from_token(&self, bearer: &str)
        -> Result<Option<Principal>, AuthorityError>;

    /// Whether the authority holds a `(principal, role)` grant.
    async fn has_role(&self, principal_id: Uuid, role: &str) -> Result<bool, AuthorityError>;
}

/// Fail-closed wrapper around the role authority.
#[derive(Clone)]
pub struct RoleVerifier {
    authority: Arc<dyn RoleAuthority>,
}

impl RoleVerifier {
    pub fn new(authority: Arc<dyn RoleAuthority>) -> Self {
        Self { authority }
    }

    /// Resolve the active session's principal. A missing header, an
    /// unknown token, and an authority failure all yield `None`.
    pub async fn current_principal(&self, bearer: Option<&str>) -> Option<Principal> {
        let bearer = bearer?;
        match self.authority.principal_from_token(bearer).await {
            Ok(principal) => principal,
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed, treating as anonymous");
                None
            }
        }
    }

    /// Whether the principal holds the admin role.
    ///
    /// Never errors: any failure reaching the authority is answered with
    /// `false`, and the cause is logged for diagnostics only.
    pub async fn is_admin(&self, principal: &Principal) -> bool {
        match self.authority.has_role(principal.id, ROLE_ADMIN).await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::warn!(principal = %principal.id, error = %e, "role check failed, denying");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingAuthority;

    #[async_trait]
    impl RoleAuthority for FailingAuthority {
        async fn principal_from_token(
            &self,
            _bearer: &str,
        ) -> Result<Option<Principal>, AuthorityError> {
            Err(AuthorityError::Upstream(String::from("authority offline")))
        }

        async fn has_role(&self, _id: Uuid, _role: &str) -> Result<bool, AuthorityError> {
            Err(AuthorityError::Upstream(String::from("authority offline")))
        }
    }

    struct GrantingAuthority {
        admin_id: Uuid,
    }

    #[async_trait]
    impl RoleAuthority for GrantingAuthority {
        async fn principal_from_token(
            &self,
            _bearer: &str,
        ) -> Result<Option<Principal>, AuthorityError> {
            Ok(Some(Principal {
                id: self.admin_id,
                email: None,
            }))
        }

        async fn has_role(&self, id: Uuid, role: &str) -> Result<bool, AuthorityError> {
            Ok(role == ROLE_ADMIN && id == self.admin_id)
        }
    }

    #[tokio::test]
    async fn test_is_admin_fails_closed_on_authority_error() {
        let verifier = RoleVerifier::new(Arc::new(FailingAuthority));
        let principal = Principal {
            id: Uuid::new_v4(),
            email: None,
        };
        assert!(!verifier.is_admin(&principal).await);
    }

    #[tokio::test]
    async fn test_current_principal_fails_closed() {
        let verifier = RoleVerifier::new(Arc::new(FailingAuthority));
        assert!(verifier.current_principal(Some("token")).await.is_none());
        assert!(verifier.current_principal(None).await.is_none());
    }

    #[tokio::test]
    async fn test_granted_role_is_honored() {
        let admin_id = Uuid::new_v4();
        let verifier = RoleVerifier::new(Arc::new(GrantingAuthority { admin_id }));

        let admin = verifier.current_principal(Some("token")).await.unwrap();
        assert!(verifier.is_admin(&admin).await);

        let other = Principal {
            id: Uuid::new_v4(),
            email: None,
        };
        assert!(!verifier.is_admin(&other).await);
    }
}
