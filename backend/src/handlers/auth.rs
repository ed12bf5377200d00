//! HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::auth::{AuthService, LoginInput, LoginResponse, RegisterInput};
use crate::AppState;

/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    let service = AuthService::new(state.db, &state.config);
    let user = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with username and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Identity attached to the current token
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub name: String,
}

/// Return the authenticated user's identity
pub async fn me(current_user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: current_user.0.user_id,
        username: current_user.0.username,
        name: current_user.0.name,
    })
}
