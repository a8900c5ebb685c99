use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::{error, warn};

/// JSON error body: `{"error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.error,
            "message": self.message.unwrap_or_default(),
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(err: ServiceError) -> Self {
        let code = err.code();
        match err {
            ServiceError::AlreadyExists(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Already Exists", Some(msg)),
            ServiceError::InvalidArguments(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Arguments", Some(msg)),
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::AccessDenied(msg) => {
                warn!(code, reason = %msg, "request_denied");
                JsonApiError::new(StatusCode::FORBIDDEN, "Access Denied", Some(msg))
            }
            ServiceError::Internal(msg) => {
                // details stay in the log
                error!(code, err = %msg, "request_failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", None)
            }
        }
    }
}
