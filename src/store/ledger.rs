use crate::error::{ErrorType, IntoResult, Res, Result};
use crate::model::{Record, Schema, Table, Tno, Value, TNO};
use crate::store::{sequence, Store};
use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info, warn};

/// The result of `Ledger::delete`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The ledger exists. `removed` is the number of rows that matched, which may be zero.
    Deleted { removed: usize },
    /// There is no ledger yet.
    NotFound,
}

/// The sales ledger: numbered records persisted through a `Store`.
///
/// Every mutation loads the whole table, changes it, and writes the whole table back.
pub struct Ledger {
    store: Box<dyn Store + Send>,
    schema: Schema,
}

impl Ledger {
    /// Create a new `Ledger` that uses a dynamically-dispatched `store` and the default `Schema`.
    pub fn new(store: Box<dyn Store + Send>) -> Self {
        Self {
            store,
            schema: Schema::default(),
        }
    }

    /// Returns the number the next appended record will get.
    ///
    /// This never fails: if the ledger cannot be read, numbering starts over at `1`.
    pub async fn next_tno(&mut self) -> Tno {
        match self.load().await {
            Ok(table) => sequence::next_tno(table.as_ref()),
            Err(e) => {
                warn!("Unable to read the ledger, numbering restarts at 1: {e:#}");
                1
            }
        }
    }

    /// Numbers `record`, normalizes its fields, and adds it as the last row. Any `TNo` already in
    /// `record` is overwritten. Returns the assigned number.
    pub async fn append(&mut self, mut record: Record) -> Result<Tno> {
        let tno = self.next_tno().await;
        record.insert(TNO, Value::from(tno));
        let record = self.schema.normalize_record(record);

        let mut table = self
            .load()
            .await
            .context("Unable to read the ledger before appending")
            .pub_result(ErrorType::Store)?
            .unwrap_or_default();
        table.push(record);
        self.save(&table)
            .await
            .context("Unable to write the ledger")
            .pub_result(ErrorType::Store)?;

        info!("Appended TNo {tno}, the ledger has {} rows", table.len());
        Ok(tno)
    }

    /// Every record in stored order. Empty when there is no ledger yet.
    pub async fn read_all(&mut self) -> Result<Vec<Record>> {
        let table = self.load().await.pub_result(ErrorType::Store)?;
        Ok(table.map(Table::into_rows).unwrap_or_default())
    }

    /// The record whose `TNo` equals `tno`, or `None` if there is no ledger or no such record.
    pub async fn read_one(&mut self, tno: Tno) -> Result<Option<Record>> {
        let table = self.load().await.pub_result(ErrorType::Store)?;
        Ok(table.and_then(|t| t.find(tno).cloned()))
    }

    /// Removes every record whose `TNo` equals `tno`. Other records keep their numbers.
    pub async fn delete(&mut self, tno: Tno) -> Result<DeleteOutcome> {
        let Some(mut table) = self.load().await.pub_result(ErrorType::Store)? else {
            debug!("Delete of TNo {tno} requested but there is no ledger");
            return Ok(DeleteOutcome::NotFound);
        };
        let removed = table.remove(tno);
        if removed > 0 {
            self.save(&table)
                .await
                .context("Unable to write the ledger")
                .pub_result(ErrorType::Store)?;
            info!("Deleted TNo {tno} ({removed} row(s))");
        } else {
            debug!("Delete of TNo {tno} matched no rows");
        }
        Ok(DeleteOutcome::Deleted { removed })
    }

    async fn load(&mut self) -> Res<Option<Table>> {
        match self.store.get().await? {
            Some(cells) => Table::parse(cells, &self.schema).map(Some),
            None => Ok(None),
        }
    }

    async fn save(&mut self, table: &Table) -> Res<()> {
        self.store.put(&table.to_cells()).await
    }
}
