// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the portfolio API.
//!
//! Every domain error is recovered at the handler boundary and rendered as
//! a JSON envelope; internal errors are logged server-side and surfaced as
//! a generic 500 with no detail leaked to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Too many submissions. Please try again later.")]
    RateLimited { retry_after: Duration },

    #[error("Campaign not found")]
    CampaignNotFound,

    #[error("Campaign has already been sent")]
    CampaignAlreadySent,

    #[error("Campaign send already in progress")]
    SendInProgress,

    #[error("Unknown unsubscribe token")]
    UnknownUnsubscribeToken,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::RateLimited { retry_after } => {
                let body = Json(ErrorResponse {
                    error: self.to_string(),
                });
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [("Retry-After", retry_after.as_secs().to_string())],
                    body,
                )
                    .into_response();
            }
            AppError::CampaignNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::CampaignAlreadySent | AppError::SendInProgress => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::UnknownUnsubscribeToken => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Internal(err) => {
                error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
