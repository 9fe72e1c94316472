use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserSummary;

/// Blog post as served to clients, augmented with its creator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_serializes_external_id_only() {
        let blog = Blog {
            id: Uuid::new_v4(),
            title: "Patterns".to_string(),
            author: Some("Alex".to_string()),
            url: "https://example.com/patterns".to_string(),
            likes: 0,
            user: UserSummary {
                id: Uuid::new_v4(),
                username: "alex".to_string(),
                name: None,
            },
        };
        let value = serde_json::to_value(&blog).unwrap();
        assert!(value.get("id").is_some());
        assert!(value.get("blog_id").is_none());
        assert!(value["user"].get("id").is_some());
        assert!(value["user"].get("user_id").is_none());
    }
}
