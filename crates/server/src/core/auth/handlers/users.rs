use crate::blogs::Blog;
use crate::core::auth::UserInfo;
use crate::core::config::AppState;
use crate::core::error::Result;
use crate::core::extract::JsonBody;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

/// A blog as listed under its owner, without the owner repeated.
#[derive(Debug, Serialize)]
pub struct OwnedBlog {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
}

impl From<Blog> for OwnedBlog {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserWithBlogs {
    #[serde(flatten)]
    pub user: UserInfo,
    pub blogs: Vec<OwnedBlog>,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserInfo>)> {
    info!("POST /api/users - {}", req.username);

    let user = state.auth.signup(req.username, req.name, req.password).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserWithBlogs>>> {
    info!("GET /api/users");

    let users = state.auth.list_users().await?;
    let mut listed = Vec::with_capacity(users.len());
    for user in users {
        let blogs = state.blogs.list_by_owner(&user.id).await?;
        listed.push(UserWithBlogs {
            user,
            blogs: blogs.into_iter().map(OwnedBlog::from).collect(),
        });
    }

    Ok(Json(listed))
}
