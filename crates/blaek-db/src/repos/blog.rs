use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const BLOG_COLUMNS: &str = "blog_id, title, author, url, likes, user_id, created_at";

const BLOG_WITH_OWNER_COLUMNS: &str = "b.blog_id, b.title, b.author, b.url, b.likes, b.created_at, \
     u.user_id, u.username, u.name AS user_name";

/// Blog row from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    pub blog_id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Blog row joined with its owning user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogWithOwnerRow {
    pub blog_id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
    pub user_name: Option<String>,
}

/// Fields for a new blog post
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
}

/// Repository for blog post operations
pub struct BlogRepo;

impl BlogRepo {
    /// Create a new blog post owned by `new.user_id`
    pub async fn create(pool: &PgPool, new: &NewBlog) -> Result<Uuid> {
        let blog_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO blog (blog_id, title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(blog_id)
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.url)
        .bind(new.likes)
        .bind(new.user_id)
        .execute(pool)
        .await
        .context("Failed to create blog")?;

        Ok(blog_id)
    }

    /// Get a blog by ID, joined with its owner
    pub async fn get_with_owner(pool: &PgPool, blog_id: Uuid) -> Result<Option<BlogWithOwnerRow>> {
        let blog = sqlx::query_as::<_, BlogWithOwnerRow>(&format!(
            "SELECT {} FROM blog b JOIN \"user\" u ON u.user_id = b.user_id WHERE b.blog_id = $1",
            BLOG_WITH_OWNER_COLUMNS
        ))
        .bind(blog_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog by ID")?;

        Ok(blog)
    }

    /// List all blogs joined with their owners, oldest first
    pub async fn list_with_owners(pool: &PgPool) -> Result<Vec<BlogWithOwnerRow>> {
        let blogs = sqlx::query_as::<_, BlogWithOwnerRow>(&format!(
            "SELECT {} FROM blog b JOIN \"user\" u ON u.user_id = b.user_id ORDER BY b.created_at",
            BLOG_WITH_OWNER_COLUMNS
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list blogs")?;

        Ok(blogs)
    }

    /// List bare blog rows, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<BlogRow>> {
        let blogs = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {} FROM blog ORDER BY created_at",
            BLOG_COLUMNS
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list blog rows")?;

        Ok(blogs)
    }

    /// Replace mutable fields; absent fields keep their stored value.
    /// Returns false when no row with that ID exists.
    pub async fn update(
        pool: &PgPool,
        blog_id: Uuid,
        title: Option<&str>,
        author: Option<&str>,
        url: Option<&str>,
        likes: Option<i64>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blog
            SET title = COALESCE($1, title),
                author = COALESCE($2, author),
                url = COALESCE($3, url),
                likes = COALESCE($4, likes)
            WHERE blog_id = $5
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(url)
        .bind(likes)
        .bind(blog_id)
        .execute(pool)
        .await
        .context("Failed to update blog")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete by ID. Returns false when no row with that ID existed.
    pub async fn delete(pool: &PgPool, blog_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog WHERE blog_id = $1")
            .bind(blog_id)
            .execute(pool)
            .await
            .context("Failed to delete blog")?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all blogs
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blog")
            .fetch_one(pool)
            .await
            .context("Failed to count blogs")?;
        Ok(count.0)
    }
}
