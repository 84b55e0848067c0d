//! Access tokens
//!
//! HS256 JWTs carrying the user id (`sub`) and username. Verification
//! failures are split into distinct kinds so clients can tell a missing
//! header from a bad signature or an expired session.

use anyhow::Context;
use axum::http::HeaderValue;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token missing")]
    Missing,

    #[error("token malformed")]
    Malformed,

    #[error("token invalid")]
    Invalid,

    #[error("token expired")]
    Expired,
}

/// Signing and verification keys derived from one shared secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn issue(&self, user_id: &str, username: &str) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_owned(),
            username: username.to_owned(),
            iat: now.timestamp().max(0) as usize,
            exp: (now + self.ttl).timestamp().max(0) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::Malformed,
                _ => TokenError::Invalid,
            })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, TokenError> {
    let value = header
        .ok_or(TokenError::Missing)?
        .to_str()
        .map_err(|_| TokenError::Malformed)?;

    match value.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                Err(TokenError::Malformed)
            } else {
                Ok(token)
            }
        }
        _ => Err(TokenError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let keys = TokenKeys::new("secret", 3600);
        let token = keys.issue("user-1", "alice").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = TokenKeys::new("secret", 3600).issue("user-1", "alice").unwrap();
        let other = TokenKeys::new("another secret", 3600);
        assert_eq!(other.verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_expired_token() {
        // Well past the default validation leeway.
        let keys = TokenKeys::new("secret", -3600);
        let token = keys.issue("user-1", "alice").unwrap();
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let keys = TokenKeys::new("secret", 3600);
        assert_eq!(keys.verify("not-a-jwt").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let header = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&header)), Ok("abc.def.ghi"));

        let header = HeaderValue::from_static("bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&header)), Ok("abc.def.ghi"));

        assert_eq!(bearer_token(None), Err(TokenError::Missing));

        let header = HeaderValue::from_static("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(Some(&header)), Err(TokenError::Malformed));

        let header = HeaderValue::from_static("Bearer ");
        assert_eq!(bearer_token(Some(&header)), Err(TokenError::Malformed));
    }
}
