use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal user shape embedded in blog responses and returned on registration
/// (safe for client responses -- no password_hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// A blog as it appears under its owning user (no nested owner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedBlog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

/// User listing entry, augmented with the blogs the user created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<OwnedBlog>,
}
