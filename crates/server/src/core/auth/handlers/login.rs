use crate::core::config::AppState;
use crate::core::error::Result;
use crate::core::extract::JsonBody;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    info!("POST /api/login - {}", req.username);

    let outcome = state.auth.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        username: outcome.user.username,
        name: outcome.user.name,
    }))
}
