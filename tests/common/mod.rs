#![allow(dead_code)]

use std::path::PathBuf;

use sqlidm::SqliteIdm;
use sqlidm::config::IdmConfig;
use tempfile::TempDir;

/// An on-disk identity database that lives as long as the value.
pub struct TestStore {
    pub temp_dir: TempDir,
    pub config: IdmConfig,
}

impl TestStore {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = IdmConfig {
            db_path: temp_dir.path().join("identities.db"),
            ..IdmConfig::default()
        };
        Self { temp_dir, config }
    }

    pub fn db_path(&self) -> PathBuf {
        self.config.db_path.clone()
    }

    pub fn open(&self) -> SqliteIdm {
        SqliteIdm::open(&self.config).expect("open identity store")
    }
}
