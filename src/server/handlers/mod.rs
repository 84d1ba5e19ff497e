// src/server/handlers/mod.rs
//! HTTP request handlers for the Gourmet server

pub mod auth;
pub mod recipes;

use crate::Error;
use crate::server::ServerState;
use axum::Json;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Shared server state handle passed to every handler
pub type SharedState = Arc<ServerState>;

/// Response body carrying a single human-readable message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

/// Error wrapper that renders crate errors as JSON responses
pub struct ApiError(pub Error);

/// Result alias for handler functions
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Conflict(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "conflict",
                    "message": self.0.to_string(),
                }),
            ),
            Error::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({
                    "error": "unauthorized",
                    "message": self.0.to_string(),
                }),
            ),
            Error::NotFound(_) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({
                    "error": "not_found",
                    "message": self.0.to_string(),
                }),
            ),
            Error::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "validation_failed",
                    "fields": fields,
                }),
            ),
            _ => {
                error!("Internal error while serving request: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "error": "internal",
                        "message": "Internal server error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Extract and verify the bearer token, returning the caller's user id
pub(crate) fn authenticate(state: &ServerState, headers: &HeaderMap) -> ApiResult<i64> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ApiError(Error::Unauthorized(
                "Missing Authorization header".to_string(),
            ))
        })?;

    let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError(Error::Unauthorized(
            "Authorization header must use the Bearer scheme".to_string(),
        ))
    })?;

    let user_id = state.tokens.verify(token)?;
    Ok(user_id)
}
