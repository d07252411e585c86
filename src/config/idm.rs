use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdmConfig {
    /// Path of the SQLite database file, or `:memory:` for a private in-memory store.
    pub db_path: PathBuf,
    pub admin_group: String,
    pub admin_user: String,
    /// How long a connection waits on a lock held by another process.
    pub busy_timeout_ms: u64,
}

impl IdmConfig {
    /// Reads a TOML config file. Fields missing from the file keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: IdmConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            db_path: PathBuf::from(MEMORY_DB),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == MEMORY_DB
    }

    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.admin_group.is_empty() {
            return Err(Error::Config("admin_group cannot be empty".to_string()));
        }
        if self.admin_user.is_empty() {
            return Err(Error::Config("admin_user cannot be empty".to_string()));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(Error::Config("db_path cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for IdmConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/identities.db"),
            admin_group: "root".to_string(),
            admin_user: "root".to_string(),
            busy_timeout_ms: 5000,
        }
    }
}
