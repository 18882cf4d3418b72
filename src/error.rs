//! Error taxonomy and response mapping for the trust boundary handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the endpoint handlers.
///
/// Every variant renders as a JSON envelope; upstream detail stays in
/// the logs and never reaches a response body.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing input.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced entity is absent. Reported at 400: the anonymous
    /// endpoints treat a lookup miss as a client error.
    #[error("{0}")]
    NotFound(String),

    /// Presented unsubscribe token does not match the stored secret.
    #[error("Invalid unsubscribe token")]
    InvalidToken,

    /// Failed role check or missing session.
    #[error("{0}")]
    Unauthorized(String),

    /// Duplicate subscription.
    #[error("{0}")]
    Conflict(String),

    /// A persistence or authority collaborator failed.
    #[error("{0}")]
    Upstream(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_)
            | GatewayError::NotFound(_)
            | GatewayError::InvalidToken
            | GatewayError::Conflict(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // duplicate subscriptions use the `message` field; callers
            // branch on it
            GatewayError::Conflict(message) => json!({ "success": false, "message": message }),
            other => json!({ "success": false, "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_conflict_uses_message_field() {
        let response =
            GatewayError::Conflict(String::from("Email already exists")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Email already exists");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_failures_use_error_field() {
        let response = GatewayError::NotFound(String::from("Subscriber not found")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Subscriber not found");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::BadRequest(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(GatewayError::InvalidToken.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::Unauthorized(String::new()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::Upstream(String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
