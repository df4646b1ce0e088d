use absences_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors a handler can answer with.
///
/// Rendered as `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No aggregation cycle has completed since the last refresh started.
    #[error("Absence data is still loading")]
    NotReady,

    /// The latest aggregation cycle failed upstream. Holds the upstream
    /// error text, which is logged but not sent to the client.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status, machine-readable code, and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, key }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} '{key}' not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_READY",
                self.to_string(),
            ),
            AppError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The absences service could not be reached".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Upstream(msg) = &self {
            tracing::warn!(error = %msg, "Serving upstream failure");
        }

        let (status, code, message) = self.parts();
        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
