use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use telemetry_app::{ApiError, AppError};
use tracing::{debug, error};

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    body: ApiError,
}

impl HttpError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiError::error(status.as_u16(), error),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ApiError::message(StatusCode::NOT_FOUND.as_u16(), message),
        }
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        match &err {
            AppError::InvalidInput(_) | AppError::NotFound(_) => {
                debug!(error = %err, "request rejected");
            }
            _ => error!(error = %err, "request failed"),
        }
        let body = ApiError::from(err);
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, body }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
