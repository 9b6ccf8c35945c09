//! Per-user locations and the optional `~/.ggg/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = ".ggg";
pub const DATABASE_FILE: &str = "notes.db";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GggConfig {
    /// Database file; relative paths are taken from the home directory.
    pub database: Option<PathBuf>,
    /// Editor command used instead of `$EDITOR`.
    pub editor: Option<String>,
}

impl GggConfig {
    /// Database path, honouring an explicit override first.
    pub fn database_path(&self, home: &Path, cli_override: Option<&Path>) -> PathBuf {
        match cli_override.or(self.database.as_deref()) {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => home.join(path),
            None => default_database_path_in(home),
        }
    }
}

pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| Error::Config("could not determine the home directory".to_string()))
}

pub fn default_database_path_in(home: &Path) -> PathBuf {
    home.join(APP_DIR).join(DATABASE_FILE)
}

pub fn default_config_path_in(home: &Path) -> PathBuf {
    home.join(APP_DIR).join(CONFIG_FILE)
}

pub fn load_config(path: &Path) -> Result<GggConfig> {
    if !path.exists() {
        return Ok(GggConfig::default());
    }

    tracing::debug!("Loading config from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let config: GggConfig = toml::from_str(&contents)?;
    Ok(config)
}

pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            restrict_to_owner(parent)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_dir: &Path) -> Result<()> {
    Ok(())
}
