//! Blog handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::{Blog, BlogUpdate, NewBlog};
use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::{Error, Result};
use crate::core::extract::JsonBody;

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::BadRequest(format!("`{}` is required", field))),
    }
}

/// Likes are stored as a signed 64-bit integer.
fn likes_in_range(likes: u64) -> Result<u64> {
    if i64::try_from(likes).is_ok() {
        Ok(likes)
    } else {
        Err(Error::BadRequest("`likes` is out of range".to_string()))
    }
}

/// GET /api/blogs
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>> {
    info!("GET /api/blogs");
    Ok(Json(state.blogs.list().await?))
}

/// GET /api/blogs/{id}
pub async fn get_blog(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Blog>> {
    info!("GET /api/blogs/{}", id);

    let blog = state.blogs.get(&id).await?;
    blog.map(Json).ok_or(Error::BlogNotFound { id })
}

/// POST /api/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    JsonBody(req): JsonBody<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Blog>)> {
    info!("POST /api/blogs - by {}", ctx.username());

    let blog = NewBlog {
        title: required(req.title, "title")?,
        url: required(req.url, "url")?,
        author: req.author.unwrap_or_default(),
        likes: likes_in_range(req.likes.unwrap_or(0))?,
        user_id: Some(ctx.user_id().to_string()),
    };

    let created = state.blogs.create(blog).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Load a blog and make sure the caller owns it.
async fn owned_blog(state: &AppState, ctx: &Ctx, id: &str) -> Result<Blog> {
    let blog = state
        .blogs
        .get(id)
        .await?
        .ok_or_else(|| Error::BlogNotFound { id: id.to_string() })?;

    ctx.ensure_owner(&blog).inspect_err(|_| {
        warn!("User {} may not modify blog {}", ctx.username(), id);
    })?;

    Ok(blog)
}

/// PUT /api/blogs/{id}
pub async fn update_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<BlogUpdate>,
) -> Result<Json<Blog>> {
    info!("PUT /api/blogs/{} - by {}", id, ctx.username());

    owned_blog(&state, &ctx, &id).await?;

    if matches!(&update.title, Some(t) if t.trim().is_empty()) {
        return Err(Error::BadRequest("`title` must not be empty".to_string()));
    }
    if matches!(&update.url, Some(u) if u.trim().is_empty()) {
        return Err(Error::BadRequest("`url` must not be empty".to_string()));
    }
    if let Some(likes) = update.likes {
        likes_in_range(likes)?;
    }

    let updated = state.blogs.update(&id, update).await?;
    updated.map(Json).ok_or(Error::BlogNotFound { id })
}

/// DELETE /api/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    info!("DELETE /api/blogs/{} - by {}", id, ctx.username());

    owned_blog(&state, &ctx, &id).await?;

    if state.blogs.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::BlogNotFound { id })
    }
}
