use crate::error::ApiError;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use blaek_common::models::blog::Blog;
use blaek_common::models::user::UserSummary;
use blaek_db::{BlogRepo, BlogWithOwnerRow, NewBlog};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

fn to_blog(row: BlogWithOwnerRow) -> Blog {
    Blog {
        id: row.blog_id,
        title: row.title,
        author: row.author,
        url: row.url,
        likes: row.likes,
        user: UserSummary {
            id: row.user_id,
            username: row.username,
            name: row.user_name,
        },
    }
}

fn parse_blog_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse()
        .map_err(|_| ApiError::BadRequest("malformed blog id".to_string()))
}

fn required_field(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}

/// GET /api/blogs -- public, 200 with an empty array when there are none
#[tracing::instrument(skip(state))]
pub async fn list_blogs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Blog>>, ApiError> {
    let rows = BlogRepo::list_with_owners(&state.pool).await?;
    Ok(Json(rows.into_iter().map(to_blog).collect()))
}

/// POST /api/blogs -- token required; the post is owned by the token's user
#[tracing::instrument(skip(state, req))]
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let title = required_field(req.title.as_deref(), "title")?;
    let url = required_field(req.url.as_deref(), "url")?;

    let new = NewBlog {
        title,
        author: req.author,
        url,
        likes: req.likes.unwrap_or(0),
        user_id: auth.user_id,
    };

    let blog_id = BlogRepo::create(&state.pool, &new).await?;
    let row = BlogRepo::get_with_owner(&state.pool, blog_id)
        .await?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("created blog {} missing", blog_id)))?;

    Ok((StatusCode::CREATED, Json(to_blog(row))))
}

/// PUT /api/blogs/{id} -- replaces mutable fields, notably likes.
/// Deliberately unauthenticated; see DESIGN.md.
#[tracing::instrument(skip(state, req))]
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, ApiError> {
    let blog_id = parse_blog_id(&id)?;

    let updated = BlogRepo::update(
        &state.pool,
        blog_id,
        req.title.as_deref(),
        req.author.as_deref(),
        req.url.as_deref(),
        req.likes,
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("blog not found".to_string()));
    }

    let row = BlogRepo::get_with_owner(&state.pool, blog_id)
        .await?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("updated blog {} missing", blog_id)))?;

    Ok(Json(to_blog(row)))
}

/// DELETE /api/blogs/{id} -- token required; 204 whether or not the id existed
#[tracing::instrument(skip(state, _auth))]
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let blog_id = parse_blog_id(&id)?;

    BlogRepo::delete(&state.pool, blog_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_trims_whitespace() {
        assert_eq!(required_field(Some("  x  "), "title").unwrap(), "x");
    }

    #[test]
    fn test_required_field_rejects_empty_and_missing() {
        assert!(required_field(Some("   "), "title").is_err());
        assert!(required_field(None, "url").is_err());
    }

    #[test]
    fn test_parse_blog_id_rejects_garbage() {
        assert!(parse_blog_id("not-a-uuid").is_err());
        assert!(parse_blog_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
