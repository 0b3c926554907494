/**
 * Error Conversion
 *
 * `BackendError` implements `IntoResponse`, so handlers and middleware can
 * return it directly. This is the only place client-visible error bodies
 * are produced.
 *
 * # Response Format
 *
 * ```json
 * { "message": "authentication required" }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Internal { cause } => tracing::error!("Internal error: {}", cause),
            other if status == StatusCode::UNAUTHORIZED => {
                tracing::debug!("Rejected request: {}", other)
            }
            other => tracing::warn!("Request failed: {}", other),
        }

        let body = serde_json::json!({ "message": self.message() });
        (status, Json(body)).into_response()
    }
}

/// Fallback for unmatched routes
pub async fn route_not_found() -> BackendError {
    BackendError::not_found("requested resource not found")
}

/// Fallback for a known path called with an unsupported method
pub async fn method_not_allowed() -> BackendError {
    BackendError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_renders_message_body() {
        let response = BackendError::conflict("account already exists").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "account already exists" })
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response = BackendError::internal("bcrypt: invalid cost").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "internal server error");
        assert!(!body.to_string().contains("bcrypt"));
    }

    #[tokio::test]
    async fn test_route_not_found() {
        let response = route_not_found().await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_not_allowed_has_message_body() {
        let response = method_not_allowed().await.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "method not allowed" })
        );
    }
}
