use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("db error: {0}")]
    Db(#[from] telemetry_db::DbError),
    /// Storage failure of a named operation; `message` is safe to show callers.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: telemetry_db::DbError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn storage(message: &'static str) -> impl FnOnce(telemetry_db::DbError) -> Self {
        move |source| Self::Storage { message, source }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Error body returned to HTTP callers.
///
/// Not-found responses carry `message`; everything else carries `error`.
/// Internal details never reach the body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn error(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            error: None,
            message: Some(message.into()),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidInput(message) => Self::error(400, message),
            AppError::NotFound(message) => Self::message(404, message),
            AppError::Storage { message, .. } => Self::error(500, message),
            AppError::Db(_) | AppError::Io(_) => Self::error(500, "Internal server error"),
        }
    }
}
