use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error("No car with id={0}")]
    CarNotFound(i64),
    #[error("{0}")]
    BadTrip(String),
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Io(_) | AppError::Database(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::CarNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadTrip(_) | AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) | AppError::Io(_) | AppError::Database(_) | AppError::Other(_) => {
                "internal"
            }
            AppError::CarNotFound(_) => "not_found",
            AppError::BadTrip(_) => "bad_trip",
            AppError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            error!("request failed: {self:?}");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "code": self.code(), "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
