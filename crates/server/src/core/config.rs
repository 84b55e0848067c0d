//! Server configuration

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::blogs::{BlogRepository, SqliteBlogStore};
use crate::core::auth::AuthManager;
use crate::core::db;

/// Configuration for the bloglist server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Root data directory
    pub data_dir: PathBuf,
    /// SQLite database file
    pub db_path: PathBuf,
    /// HTTP listen port
    pub port: u16,
    /// HMAC secret used to sign access tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub token_ttl_secs: i64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = bloglist_common::data_root();
        Self {
            db_path: bloglist_common::database_path(&data_dir),
            data_dir,
            port: env_or("PORT", 3003),
            jwt_secret: std::env::var("SECRET").unwrap_or_else(|_| {
                warn!("SECRET is not set, tokens will not survive a restart");
                uuid::Uuid::new_v4().simple().to_string()
            }),
            token_ttl_secs: env_or("TOKEN_TTL_SECS", 3600),
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    /// Create config with custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        let base = base_dir.into();
        config.db_path = bloglist_common::database_path(&base);
        config.data_dir = base;
        config
    }

    /// Ensure all directories exist
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        if let Some(parent) = self.db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub auth: Arc<AuthManager>,
    pub blogs: Arc<dyn BlogRepository>,
}

impl AppState {
    /// Open the database under `config` and wire up the managers.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        config.ensure_dirs().await?;

        let pool = db::connect(&config.db_path).await?;
        db::init_schema(&pool).await?;
        info!("Database ready at {:?}", config.db_path);

        Ok(Self::with_pool(config, pool))
    }

    pub fn with_pool(config: ServerConfig, pool: SqlitePool) -> Self {
        let auth = Arc::new(AuthManager::new(pool.clone(), &config));
        let blogs: Arc<dyn BlogRepository> = Arc::new(SqliteBlogStore::new(pool));
        Self {
            config,
            auth,
            blogs,
        }
    }
}
