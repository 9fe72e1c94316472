use anyhow::{Context, Result};
use blaek_common::models::blog::Blog;
use blaek_common::models::user::{User, UserSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// HTTP client for communicating with the Blæk server
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

#[derive(Debug, Serialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: Option<i64>,
}

#[derive(Debug, Serialize)]
struct UpdateLikesRequest {
    likes: i64,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    name: Option<&'a str>,
    password: &'a str,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Arc::from(base_url),
            token: token.map(Arc::from),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn check(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let err = body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        anyhow::bail!("{} failed with status {}: {}", what, status, err);
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/api/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .context("Failed to connect to server")?;

        let response = Self::check(response, "Login").await?;
        response.json().await.context("Failed to parse login response")
    }

    pub async fn register(
        &self,
        username: &str,
        name: Option<&str>,
        password: &str,
    ) -> Result<UserSummary> {
        let url = format!("{}/api/users", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RegisterRequest {
                username,
                name,
                password,
            })
            .send()
            .await
            .context("Failed to connect to server")?;

        let response = Self::check(response, "Registration").await?;
        response
            .json()
            .await
            .context("Failed to parse registration response")
    }

    pub async fn list_blogs(&self) -> Result<Vec<Blog>> {
        let url = format!("{}/api/blogs", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to server")?;

        let response = Self::check(response, "Listing blogs").await?;
        response.json().await.context("Failed to parse blog list")
    }

    pub async fn create_blog(&self, req: &CreateBlogRequest) -> Result<Blog> {
        let url = format!("{}/api/blogs", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .json(req)
            .send()
            .await
            .context("Failed to connect to server")?;

        let response = Self::check(response, "Creating blog").await?;
        response.json().await.context("Failed to parse created blog")
    }

    /// The likes update is an open route; no token is attached.
    pub async fn update_likes(&self, id: Uuid, likes: i64) -> Result<Blog> {
        let url = format!("{}/api/blogs/{}", self.base_url, id);
        let response = self
            .client
            .put(&url)
            .json(&UpdateLikesRequest { likes })
            .send()
            .await
            .context("Failed to connect to server")?;

        let response = Self::check(response, "Updating blog").await?;
        response.json().await.context("Failed to parse updated blog")
    }

    pub async fn delete_blog(&self, id: Uuid) -> Result<()> {
        let url = format!("{}/api/blogs/{}", self.base_url, id);
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .context("Failed to connect to server")?;

        Self::check(response, "Deleting blog").await?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/api/users", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to server")?;

        let response = Self::check(response, "Listing users").await?;
        response.json().await.context("Failed to parse user list")
    }
}
