//! Implements the `Store` trait in memory.
//!
//! Note: this is compiled even in the "production" version of this app so that the whole app can
//! run, top-to-bottom, without touching the file system.

use crate::error::Res;
use crate::store::Store;
use std::sync::{Arc, Mutex};

/// A `Store` that holds its rows in memory. Clones share the same rows, so a test can keep a
/// handle and look at what a `Ledger` wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Option<Vec<Vec<String>>>>>,
    fail: Option<String>,
}

impl MemoryStore {
    /// An empty store, as if no ledger file had been created yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `rows`.
    pub fn with_rows<S, R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self {
            rows: Arc::new(Mutex::new(Some(rows))),
            fail: None,
        }
    }

    /// A store whose reads fail with `message`, like an artifact that exists but is unreadable.
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(Some(Vec::new()))),
            fail: Some(message.into()),
        }
    }

    /// A copy of the current rows.
    pub fn rows(&self) -> Option<Vec<Vec<String>>> {
        match self.rows.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get(&mut self) -> Res<Option<Vec<Vec<String>>>> {
        if let Some(message) = &self.fail {
            anyhow::bail!("{message}");
        }
        Ok(self.rows())
    }

    async fn put(&mut self, rows: &[Vec<String>]) -> Res<()> {
        let mut guard = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("The in-memory store lock is poisoned"))?;
        *guard = Some(rows.to_vec());
        Ok(())
    }
}
