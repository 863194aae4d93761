// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel_async::pooled_connection::PoolError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

/// Failures surfaced by the feed, sharing and notification operations
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication credentials were not provided or are invalid")]
    AuthenticationRequired,

    #[error("{0}")]
    AuthorizationDenied(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::ValidationFailed(detail.into())
    }

    /// Machine-checkable kind rendered alongside the detail string
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::AuthenticationRequired => "authentication_required",
            AppError::AuthorizationDenied(_) => "authorization_denied",
            AppError::NotFound(_) => "not_found",
            AppError::ValidationFailed(_) => "validation_failed",
            AppError::Database(_) | AppError::Pool(_) | AppError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Pool(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<deadpool::managed::PoolError<PoolError>> for AppError {
    fn from(err: deadpool::managed::PoolError<PoolError>) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationFailed(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ValidationFailed(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (
            status,
            Json(json!({
                "error": self.kind(),
                "detail": self.to_string(),
            })),
        )
            .into_response()
    }
}
