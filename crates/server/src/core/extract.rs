//! Request body extraction

use axum::extract::FromRequest;

use crate::core::error::Error;

/// JSON request body whose rejections go through [`Error`], so malformed
/// or mistyped bodies answer 400 with the usual `{"error": msg}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);
