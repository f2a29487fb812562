use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Service-level error taxonomy.
///
/// Every handler returns `Result<_, ServiceError>`; expected conditions
/// (not-found, conflict) are produced explicitly by the services, anything
/// unexpected funnels through `DatabaseError` / `InternalServerError` and is
/// logged with context before it reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Single source of truth for the error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_) | Self::EventError(_) | Self::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message suitable for HTTP responses. Internal errors collapse to a
    /// generic message so storage or event detail never leaks to the caller.
    pub fn response_message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::ValidationError(msg)
            | Self::InvalidInput(msg)
            | Self::Conflict(msg) => msg.clone(),
            Self::DatabaseError(_) | Self::EventError(_) | Self::InternalServerError => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = json!({
            "success": false,
            "message": self.response_message(),
        });

        (status, Json(body)).into_response()
    }
}
