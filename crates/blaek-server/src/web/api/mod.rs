pub mod auth;
pub mod blogs;
pub mod middleware;
pub mod users;

use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth
        .route("/login", post(auth::login))
        // Blog collection
        .route("/blogs", get(blogs::list_blogs).post(blogs::create_blog))
        .route(
            "/blogs/{id}",
            put(blogs::update_blog).delete(blogs::delete_blog),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .with_state(state)
}
