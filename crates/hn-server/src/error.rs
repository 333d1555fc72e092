use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hn_core::HnError;
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    /// Parametros invalidos
    BadRequest(String),

    /// The upstream item source failed.
    Upstream(String),

    /// The request was cancelled or ran past its deadline.
    Timeout,

    /// Error interno
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<HnError> for AppError {
    fn from(err: HnError) -> Self {
        match err {
            HnError::Validation { message, .. } => AppError::BadRequest(message),
            HnError::Upstream(source) => AppError::Upstream(source.to_string()),
            HnError::Cancelled => AppError::Timeout,
            HnError::Internal(message) => AppError::Internal(message),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg) => msg,
            AppError::Upstream(msg) => {
                error!(error = %msg, "Upstream failure while building page");
                format!("Upstream source failed: {}", msg)
            },
            AppError::Timeout => "Request was cancelled or timed out".to_string(),
            AppError::Internal(msg) => {
                error!(error = %msg, "Internal error while building page");
                msg
            },
        };

        let body = Json(ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message,
        });

        (status, body).into_response()
    }
}
