//! Authentication route handlers.
//!
//! Login and registration are mocked: inputs are validated, a simulated
//! delay elapses, and a fabricated user is returned and persisted.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use moto_shop_core::User;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Registration payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Handle login.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<User>> {
    let user = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(user))
}

/// Handle registration.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state
        .auth_service()
        .register(
            &payload.name,
            &payload.email,
            &payload.password,
            &payload.password_confirm,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handle logout: clears the persisted user document.
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode> {
    state.auth_service().logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The currently logged-in user.
pub async fn me(State(state): State<AppState>) -> Result<Json<User>> {
    state
        .auth_service()
        .current_user()
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("not logged in".to_string()))
}
