// src/server/handlers/auth.rs
//! Registration, login, and the protected probe route

use crate::db::models::User;
use crate::server::handlers::{ApiError, ApiResult, MessageResponse, SharedState, authenticate};
use crate::{Error, auth};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{Json, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request body for registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response for successful login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Register a new user
///
/// POST /register
///
/// The username's UNIQUE constraint in the store is the conflict check;
/// there is no separate existence lookup, so racing registrations of
/// the same name resolve to exactly one winner.
pub async fn register(
    State(state): State<SharedState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<Response> {
    info!("Registering user '{}'", request.username);

    let result: Result<i64, crate::Error> = tokio::task::spawn_blocking(move || {
        let password_hash = auth::hash_password(&request.password)?;
        let conn = state.open_db()?;

        let mut user = User::new(request.username, password_hash);
        user.insert(&conn)
    })
    .await
    .map_err(|e| ApiError(Error::Internal(format!("Task join error: {e}"))))?;

    let user_id = result?;
    info!("User registered with id {}", user_id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            msg: "User created".to_string(),
        }),
    )
        .into_response())
}

/// Log in and receive a bearer token
///
/// POST /login
///
/// Unknown usernames and wrong passwords produce the same response, so
/// callers cannot probe which usernames exist.
pub async fn login(
    State(state): State<SharedState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let state_clone = state.clone();

    let result: Result<i64, crate::Error> = tokio::task::spawn_blocking(move || {
        let conn = state_clone.open_db()?;

        let user = match User::find_by_username(&conn, &request.username)? {
            Some(user) => user,
            None => return Err(Error::Unauthorized("Invalid credentials".to_string())),
        };

        if !auth::verify_password(&user.password_hash, &request.password)? {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        user.id
            .ok_or_else(|| Error::Internal("User row missing id".to_string()))
    })
    .await
    .map_err(|e| ApiError(Error::Internal(format!("Task join error: {e}"))))?;

    let user_id = result?;
    let access_token = state.tokens.issue(user_id)?;

    info!("User {} logged in", user_id);
    Ok(Json(TokenResponse { access_token }))
}

/// Probe route that echoes the authenticated caller
///
/// GET /protected
pub async fn protected(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = authenticate(&state, &headers)?;

    Ok(Json(MessageResponse {
        msg: format!("User with ID {user_id} accessed the protected route."),
    }))
}
