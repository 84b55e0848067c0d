//! Data directory layout for bloglist
//!
//! ```text
//! bloglist_data/
//! └── db/              # SQLite database (users + blogs)
//! ```
//!
//! The root is taken from `BLOGLIST_ROOT`, then from the persisted choice
//! in the user's config directory, then falls back to `bloglist_data`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const ROOT_ENV: &str = "BLOGLIST_ROOT";
pub const DEFAULT_ROOT: &str = "bloglist_data";
pub const DATABASE_FILE: &str = "bloglist.sqlite";

#[derive(Serialize, Deserialize, Debug, Default)]
struct PersistedConfig {
    data_root: Option<PathBuf>,
}

/// Location of the persisted config file, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bloglist").join("config.json"))
}

/// Read a persisted data root from `path`. Unreadable or malformed files
/// are logged and treated as absent.
pub fn read_root_from(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<PersistedConfig>(&content) {
            Ok(config) => config.data_root,
            Err(e) => {
                warn!("Failed to parse config file at {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read config file at {:?}: {}", path, e);
            None
        }
    }
}

/// Write `root` as the persisted data root into `path`.
pub fn write_root_to(path: &Path, root: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = PersistedConfig {
        data_root: Some(root.to_path_buf()),
    };
    fs::write(path, serde_json::to_string_pretty(&config)?)?;
    Ok(())
}

/// Persist `root` in the user's config directory.
pub fn save_persistent_root(root: &Path) -> anyhow::Result<()> {
    let path = config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config dir"))?;
    write_root_to(&path, root)?;
    info!("Saved data root {:?} to {:?}", root, path);
    Ok(())
}

pub fn load_persistent_root() -> Option<PathBuf> {
    read_root_from(&config_path()?)
}

/// Resolve the data root: environment, persisted config, default.
pub fn data_root() -> PathBuf {
    if let Ok(val) = std::env::var(ROOT_ENV) {
        return PathBuf::from(val);
    }

    if let Some(root) = load_persistent_root() {
        return root;
    }

    PathBuf::from(DEFAULT_ROOT)
}

pub fn db_dir(root: &Path) -> PathBuf {
    root.join("db")
}

pub fn database_path(root: &Path) -> PathBuf {
    db_dir(root).join(DATABASE_FILE)
}

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        info!("Created directory: {:?}", path);
    }
    Ok(())
}

/// Create the directory structure under `root` and return its canonical path.
pub fn init_structure(root: &Path) -> anyhow::Result<PathBuf> {
    ensure_dir(root)?;
    ensure_dir(&db_dir(root))?;

    let canonical = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    info!("Data directory initialized at: {:?}", canonical);

    Ok(canonical)
}
