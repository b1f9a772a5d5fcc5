//! Persistence for the ledger.
//!
//! A `Store` knows how to fetch and replace the persisted table as rows of cells, nothing more.
//! The `Ledger` sits on top of any `Store` and implements transaction numbering and the
//! append/read/delete operations, so that the persistence format is separate from the operation
//! contract.

mod csv_store;
mod ledger;
mod memory;
mod sequence;

pub use csv_store::CsvStore;
pub use ledger::{DeleteOutcome, Ledger};
pub use memory::MemoryStore;
pub use sequence::next_tno;

use crate::error::Res;

/// The persisted ledger artifact, seen as rows of cells with the header row first.
#[async_trait::async_trait]
pub trait Store {
    /// Fetches all rows. Returns `None` when the artifact does not exist.
    async fn get(&mut self) -> Res<Option<Vec<Vec<String>>>>;

    /// Replaces the whole artifact with `rows`.
    async fn put(&mut self, rows: &[Vec<String>]) -> Res<()>;
}
