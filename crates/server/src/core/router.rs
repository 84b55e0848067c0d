//! Core Router
//!
//! User registration and login routes.

use crate::core::auth::handlers as auth_handlers;
use crate::core::AppState;
use axum::{routing::post, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users",
            post(auth_handlers::create_user).get(auth_handlers::list_users),
        )
        .route("/api/login", post(auth_handlers::login))
}
