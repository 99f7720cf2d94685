//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported storage kind '{0}'; choose 'sqlite', 'mysql', 'postgres', or 'mongodb'")]
    UnsupportedKind(String),
    #[error("connection URI does not name a database")]
    MissingDatabase,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Record not found")]
    NotFound,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("driver: {0}")]
    Driver(#[from] mongodb::error::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // Not-found is a normal outcome, not a failure; it keeps the
            // `message` envelope the success paths use.
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": "Record not found" })),
            )
                .into_response(),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            AppError::Config(_) | AppError::Db(_) | AppError::Driver(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": self.to_string() })),
            )
                .into_response(),
        }
    }
}
