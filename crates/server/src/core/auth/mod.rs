//! Authentication Module
//!
//! Handles user registration, password login and access token
//! verification. Users live in the `users` table of the shared SQLite
//! database; passwords are stored as bcrypt hashes.

pub mod handlers;
pub mod middleware;
pub mod token;

use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::config::ServerConfig;
use crate::core::error::{Error, Result};
use token::{TokenError, TokenKeys};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 3;

/// Public user info (no sensitive data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

type UserRow = (String, String, Option<String>, String);

fn user_from_row((id, username, name, created_at): UserRow) -> UserInfo {
    let created_at = created_at.parse().unwrap_or_else(|e| {
        warn!(
            "[Auth] Corrupt created_at {:?} for user {}: {}",
            created_at, id, e
        );
        DateTime::<Utc>::UNIX_EPOCH
    });

    UserInfo {
        id,
        username,
        name,
        created_at,
    }
}

/// A successful login: the user and their signed access token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserInfo,
    pub token: String,
}

/// Auth manager handles all authentication
pub struct AuthManager {
    pool: SqlitePool,
    keys: TokenKeys,
    bcrypt_cost: u32,
}

impl AuthManager {
    pub fn new(pool: SqlitePool, config: &ServerConfig) -> Self {
        Self {
            pool,
            keys: TokenKeys::new(&config.jwt_secret, config.token_ttl_secs),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Register a new user
    pub async fn signup(
        &self,
        username: String,
        name: Option<String>,
        password: String,
    ) -> Result<UserInfo> {
        let username = username.trim().to_string();
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(Error::BadRequest(format!(
                "`username` must be at least {} characters long",
                MIN_USERNAME_LEN
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::BadRequest(format!(
                "`password` must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(&username)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::UsernameTaken);
        }

        let password_hash = hash(&password, self.bcrypt_cost)?;

        let user = UserInfo {
            id: Uuid::new_v4().to_string(),
            username,
            name,
            created_at: Utc::now(),
        };

        let inserted = sqlx::query(
            "INSERT INTO users (id, username, name, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => {}
            // Lost a race with a concurrent signup for the same name.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(Error::UsernameTaken)
            }
            Err(e) => return Err(e.into()),
        }

        info!("[Auth] User registered: {}", user.username);

        Ok(user)
    }

    /// Check credentials and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        // Names are stored trimmed at signup.
        let username = username.trim();
        let row: Option<(String, String, Option<String>, String, String)> = sqlx::query_as(
            "SELECT id, username, name, created_at, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, username, name, created_at, password_hash)) = row else {
            warn!("[Auth] Login attempt for unknown user {}", username);
            return Err(Error::LoginFail);
        };

        if !verify(password, &password_hash)? {
            warn!("[Auth] Failed login attempt for {}", username);
            return Err(Error::LoginFail);
        }

        let user = user_from_row((id, username, name, created_at));
        let token = self.keys.issue(&user.id, &user.username)?;

        info!("[Auth] User logged in: {}", user.username);

        Ok(LoginOutcome { user, token })
    }

    /// Verify an access token and load the user it was issued to
    pub async fn verify_token(&self, token: &str) -> Result<UserInfo> {
        let claims = self.keys.verify(token)?;

        match self.get_user(&claims.sub).await? {
            Some(user) => Ok(user),
            None => {
                warn!("[Auth] Token presented for deleted user {}", claims.sub);
                Err(TokenError::Invalid.into())
            }
        }
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserInfo>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, name, created_at FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(user_from_row))
    }

    /// List all users in registration order
    pub async fn list_users(&self) -> Result<Vec<UserInfo>> {
        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, username, name, created_at FROM users ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(user_from_row).collect())
    }
}
