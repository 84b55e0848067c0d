use crate::core::auth::token::bearer_token;
use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::Result;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Reject the request unless it carries a valid bearer token; on success
/// the caller's [`Ctx`] is stored in the request extensions.
pub async fn mw_require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    debug!("MIDDLEWARE: require_auth");

    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let user = state.auth.verify_token(token).await?;

    req.extensions_mut().insert(Ctx::from(user));

    Ok(next.run(req).await)
}
