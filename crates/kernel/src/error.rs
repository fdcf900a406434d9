//! Error types for the content tree and the admin API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised by tree providers and the item query layer.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A caller-supplied argument names something that does not exist.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required argument was missing.
    #[error("argument must not be null: {0}")]
    NullArgument(&'static str),

    /// The operation is not supported by this provider.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// The authorization backend failed to answer.
    #[error("authorization check failed")]
    Authorization(#[source] anyhow::Error),

    /// The content item session failed to execute a query.
    #[error("content item query failed")]
    Query(#[source] anyhow::Error),
}

/// Result type alias using TreeError.
pub type TreeResult<T> = Result<T, TreeError>;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl From<TreeError> for AppError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::InvalidArgument(msg) => AppError::BadRequest(msg),
            TreeError::NullArgument(name) => AppError::BadRequest(format!("missing {name}")),
            TreeError::NotImplemented(msg) => AppError::NotImplemented(msg),
            TreeError::Authorization(e) => {
                AppError::Internal(e.context("authorization check failed"))
            }
            TreeError::Query(e) => AppError::Internal(e.context("content item query failed")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        };

        // Internal details stay in the log.
        let body = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
