use crate::auth::{create_token, verify_password};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use blaek_db::UserRepo;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

// Same body for unknown username and wrong password, so a caller cannot
// probe which usernames exist.
fn login_rejected() -> ApiError {
    ApiError::Unauthorized("invalid username or password".to_string())
}

/// POST /api/login
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = UserRepo::get_by_username(&state.pool, &req.username)
        .await?
        .ok_or_else(login_rejected)?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(login_rejected());
    }

    let auth = &state.config.auth;
    let token = create_token(
        user.user_id,
        &user.username,
        &auth.jwt_secret,
        auth.token_ttl_secs,
    )?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
