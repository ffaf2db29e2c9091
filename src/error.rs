//! Error types for the resume matcher service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Text extraction failure.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    Unsupported(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("could not read DOCX body: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by the JSON API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing field, wrong file type, malformed upload (400)
    #[error("{0}")]
    BadRequest(String),

    /// Upload larger than the configured limit (413)
    #[error("File is too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Anything else (500)
    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Extract(ExtractError::Unsupported(_)) => StatusCode::BAD_REQUEST,
            AppError::Extract(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Extract(err) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("API extraction error: {}", err);
                "Internal server error".to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!("API error: {}", detail);
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, AppError>;
