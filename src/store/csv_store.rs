//! Implements the `Store` trait with a CSV file on disk.

use crate::error::Res;
use crate::store::Store;
use crate::utils;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A `Store` backed by a single CSV file. The file is created by the first `put`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl Store for CsvStore {
    async fn get(&mut self) -> Res<Option<Vec<Vec<String>>>> {
        trace!("get for {}", self.path.display());
        utils::read_csv(&self.path).await
    }

    async fn put(&mut self, rows: &[Vec<String>]) -> Res<()> {
        trace!("put {} rows to {}", rows.len(), self.path.display());
        utils::write_csv(&self.path, rows).await
    }
}
