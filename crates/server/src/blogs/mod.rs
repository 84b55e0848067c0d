//! Blogs
//!
//! Blog entries, their storage and the HTTP routes over them. Reading is
//! public; creating, updating and deleting require a bearer token, and
//! only the owner may change or remove an entry.

pub mod handlers;
pub mod stats;
pub mod store;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use bloglist_stats::BlogEntry;
use serde::{Deserialize, Serialize};

use crate::core::auth::middleware::mw_require_auth;
use crate::core::AppState;

pub use store::SqliteBlogStore;

/// The user a blog belongs to, as embedded in blog responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

/// A stored blog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<Owner>,
}

impl Blog {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user.as_ref().is_some_and(|owner| owner.id == user_id)
    }
}

impl BlogEntry for Blog {
    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

/// Fields for a blog about to be inserted
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user_id: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// Abstraction over blog persistence.
#[async_trait]
pub trait BlogRepository: Send + Sync + 'static {
    /// All blogs in insertion order.
    async fn list(&self) -> Result<Vec<Blog>>;
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Blog>>;
    async fn get(&self, id: &str) -> Result<Option<Blog>>;
    async fn create(&self, blog: NewBlog) -> Result<Blog>;
    /// Returns `None` when no blog has this id.
    async fn update(&self, id: &str, update: BlogUpdate) -> Result<Option<Blog>>;
    /// Returns whether a blog was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/blogs", get(handlers::list_blogs))
        .route("/api/blogs/{id}", get(handlers::get_blog))
        .route(
            "/api/stats",
            get(stats::stored_stats).post(stats::submitted_stats),
        );

    let protected = Router::new()
        .route("/api/blogs", post(handlers::create_blog))
        .route(
            "/api/blogs/{id}",
            put(handlers::update_blog).delete(handlers::delete_blog),
        )
        .route_layer(middleware::from_fn_with_state(state, mw_require_auth));

    public.merge(protected)
}
