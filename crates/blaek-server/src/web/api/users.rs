use crate::auth::hash_password;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use blaek_common::models::user::{OwnedBlog, User, UserSummary};
use blaek_db::{BlogRepo, UserRepo};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

const MIN_CREDENTIAL_LEN: usize = 3;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// GET /api/users -- each user augmented with the blogs they created
#[tracing::instrument(skip(state))]
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::list(&state.pool).await?;
    let blogs = BlogRepo::list(&state.pool).await?;

    let users: Vec<User> = users
        .into_iter()
        .map(|u| {
            let owned = blogs
                .iter()
                .filter(|b| b.user_id == u.user_id)
                .map(|b| OwnedBlog {
                    id: b.blog_id,
                    title: b.title.clone(),
                    author: b.author.clone(),
                    url: b.url.clone(),
                    likes: b.likes,
                })
                .collect();
            User {
                id: u.user_id,
                username: u.username,
                name: u.name,
                blogs: owned,
            }
        })
        .collect();

    Ok(Json(users))
}

/// POST /api/users -- registration
#[tracing::instrument(skip(state, req))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| u.len() >= MIN_CREDENTIAL_LEN)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "username must be at least {} characters",
                MIN_CREDENTIAL_LEN
            ))
        })?;

    let password = req
        .password
        .as_deref()
        .filter(|p| p.len() >= MIN_CREDENTIAL_LEN)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "password must be at least {} characters",
                MIN_CREDENTIAL_LEN
            ))
        })?;

    if UserRepo::get_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest("username must be unique".to_string()));
    }

    let password_hash = hash_password(password)?;
    let user_id = Uuid::new_v4();
    UserRepo::create(
        &state.pool,
        user_id,
        username,
        &password_hash,
        req.name.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserSummary {
            id: user_id,
            username: username.to_string(),
            name: req.name,
        }),
    ))
}
