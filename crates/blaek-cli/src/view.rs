use blaek_common::models::blog::Blog;
use blaek_common::models::user::User;
use std::fmt::Write;

use crate::store::State;

/// Render the blog list as a table, one row per blog keyed by its id. The
/// caller decorates rows through the callback (e.g. marking the entry it
/// just voted on); the view itself never touches the store or the API.
pub fn blog_table<F>(blogs: &[Blog], annotate: F) -> String
where
    F: Fn(&Blog) -> Option<String>,
{
    let mut out = String::new();
    let _ = writeln!(out, "{:36} {:30} {:20} LIKES", "ID", "TITLE", "AUTHOR");
    let _ = writeln!(out, "{}", "-".repeat(95));
    for blog in blogs {
        let author = blog.author.as_deref().unwrap_or("-");
        let _ = write!(
            out,
            "{:36} {:30} {:20} {}",
            blog.id, blog.title, author, blog.likes
        );
        if let Some(note) = annotate(blog) {
            let _ = write!(out, "  {}", note);
        }
        let _ = writeln!(out);
    }
    out
}

/// Render the user list, each with a count of owned blogs.
pub fn user_table(users: &[User]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:36} {:20} {:24} BLOGS", "ID", "USERNAME", "NAME");
    let _ = writeln!(out, "{}", "-".repeat(90));
    for user in users {
        let name = user.name.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{:36} {:20} {:24} {}",
            user.id,
            user.username,
            name,
            user.blogs.len()
        );
    }
    out
}

/// The notification banner, when one is active.
pub fn notification(state: &State) -> Option<String> {
    state
        .notification
        .as_ref()
        .map(|n| format!(">> {}", n.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blaek_common::models::user::{OwnedBlog, UserSummary};
    use uuid::Uuid;

    fn blog(title: &str) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: Some("Ada".to_string()),
            url: "https://example.com".to_string(),
            likes: 2,
            user: UserSummary {
                id: Uuid::new_v4(),
                username: "ada".to_string(),
                name: None,
            },
        }
    }

    #[test]
    fn test_blog_table_rows_keyed_by_id() {
        let blogs = vec![blog("one"), blog("two")];
        let rendered = blog_table(&blogs, |_| None);

        for b in &blogs {
            assert!(rendered.contains(&b.id.to_string()));
            assert!(rendered.contains(&b.title));
        }
    }

    #[test]
    fn test_blog_table_applies_annotation() {
        let target = blog("marked");
        let rendered = blog_table(std::slice::from_ref(&target), |b| {
            (b.id == target.id).then(|| "<- new".to_string())
        });
        assert!(rendered.contains("<- new"));
    }

    #[test]
    fn test_blog_table_empty_is_header_only() {
        let rendered = blog_table(&[], |_| None);
        assert_eq!(rendered.lines().count(), 2);
    }

    #[test]
    fn test_user_table_counts_blogs() {
        let user = User {
            id: Uuid::new_v4(),
            username: "grace".to_string(),
            name: Some("Grace".to_string()),
            blogs: vec![OwnedBlog {
                id: Uuid::new_v4(),
                title: "Compilers".to_string(),
                author: None,
                url: "https://example.com".to_string(),
                likes: 0,
            }],
        };
        let rendered = user_table(&[user]);
        assert!(rendered.contains("grace"));
        assert!(rendered.trim_end().ends_with('1'));
    }

    #[test]
    fn test_notification_rendering() {
        let state = State::default();
        assert!(notification(&state).is_none());

        let state = crate::store::reduce(
            &state,
            crate::store::Action::NotificationSet("you voted 'one'".to_string()),
        );
        assert_eq!(
            notification(&state).as_deref(),
            Some(">> you voted 'one'")
        );
    }
}
