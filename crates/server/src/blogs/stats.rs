//! Statistics endpoints

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use bloglist_stats::{records_from_json, summarize};
use serde_json::Value;
use tracing::info;

use crate::core::config::AppState;
use crate::core::error::Result;
use crate::core::extract::JsonBody;

/// GET /api/stats
///
/// Statistics over every stored blog.
pub async fn stored_stats(State(state): State<AppState>) -> Result<Response> {
    info!("GET /api/stats");

    let blogs = state.blogs.list().await?;
    Ok(Json(summarize(&blogs)).into_response())
}

/// POST /api/stats
///
/// Statistics over a caller-supplied array of records. The first record
/// lacking `author` or `likes` fails the whole request.
pub async fn submitted_stats(JsonBody(body): JsonBody<Value>) -> Result<Response> {
    let records = records_from_json(&body)?;
    info!("POST /api/stats - {} records", records.len());

    Ok(Json(summarize(&records)).into_response())
}
