//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::args::InsertArgs;
use crate::commands;
use crate::utils;
use crate::Config;
use tempfile::TempDir;

/// Test environment that sets up a sales home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized sales home and no ledger.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("daily-sales");
        let config = Config::create(&root, None).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Appends a valid entry for `shop` to the ledger.
    pub async fn insert_entry(&self, shop: &str) {
        let args = InsertArgs::new("01/01/2024", shop, "Rice", "10", Vec::new());
        commands::insert(self.config(), args).await.unwrap();
    }

    /// Replaces the item master with `csv`.
    pub async fn write_items(&self, csv: &str) {
        utils::write(self.config.items_path(), csv).await.unwrap();
    }
}
