use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bloglist_stats::RecordError;
use serde_json::json;
use tracing::error;

use crate::core::auth::token::TokenError;

#[derive(Debug)]
pub enum Error {
    // Auth Errors
    LoginFail,
    Token(TokenError),
    AuthFailCtxNotInRequestExt,
    NotOwner { blog_id: String },

    // Model Errors
    UsernameTaken,
    BlogNotFound { id: String },

    // Generic
    BadRequest(String),
    Internal(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Error::LoginFail => (
                StatusCode::UNAUTHORIZED,
                "invalid username or password".to_string(),
            ),
            Error::Token(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
            Error::AuthFailCtxNotInRequestExt => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "auth context missing".to_string(),
            ),
            Error::NotOwner { .. } => (
                StatusCode::UNAUTHORIZED,
                "not authorized to do this action".to_string(),
            ),
            Error::UsernameTaken => (
                StatusCode::BAD_REQUEST,
                "expected `username` to be unique".to_string(),
            ),
            Error::BlogNotFound { .. } => (StatusCode::NOT_FOUND, "blog not found".to_string()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::Token(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<RecordError> for Error {
    fn from(err: RecordError) -> Self {
        Error::BadRequest(err.to_string())
    }
}

// Storage and hashing failures surface as 500s with the detail logged.
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(format!("{:#}", err))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        Error::Internal(err.to_string())
    }
}
