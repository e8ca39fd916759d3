//! RecordLog: append-oriented ordered collection over the key-value store
//!
//! ## Key design
//!
//! - entry key: `<region>:<index as 8-byte BE>`
//! - meta key:  `<region>:__meta__` holding the next index
//!
//! Meta presence is the existence marker: a destroyed log and an empty
//! log are distinct states, and reads against a destroyed log fail
//! with `StoreUnavailable` rather than returning an empty sequence.
//!
//! Indices are assigned in strictly increasing insertion order and are
//! never renumbered; `rewrite` replaces the value at an existing index
//! with a single put, so migration is atomic at the granularity of one
//! record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ledgerbook_core::error::{Error, Result};
use ledgerbook_core::key::{entry_key, meta_key, MESSAGES_REGION, PAYMENTS_REGION};
use ledgerbook_core::traits::Storage;

/// Per-region metadata
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct LogMeta {
    next_index: u64,
}

/// Ordered, durable collection of byte records inside one keyspace region
pub struct RecordLog {
    store: Arc<dyn Storage>,
    region: &'static str,
    name: &'static str,
}

impl RecordLog {
    /// The main message collection
    pub fn messages(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            region: MESSAGES_REGION,
            name: "messages",
        }
    }

    /// The payments side-channel collection
    pub fn payments(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            region: PAYMENTS_REGION,
            name: "payments",
        }
    }

    /// Whether the collection exists (meta present)
    pub fn exists(&self) -> Result<bool> {
        self.store.contains(&meta_key(self.region))
    }

    /// Create the collection with zero records
    pub fn create(&self) -> Result<()> {
        if self.exists()? {
            return Err(Error::AlreadyInitialized);
        }
        self.write_meta(LogMeta::default())
    }

    /// Number of records; fails if the collection was destroyed
    pub fn len(&self) -> Result<u64> {
        Ok(self.read_meta()?.next_index)
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Append a record, returning its index
    ///
    /// Entry and meta land in one atomic batch, so a failed append
    /// changes nothing and never exposes a dangling index.
    pub fn append(&self, bytes: &[u8]) -> Result<u64> {
        let (index, puts) = self.stage_append(bytes)?;
        self.store.put_many(&puts)?;
        Ok(index)
    }

    /// Stage an append without committing it
    ///
    /// Returns the index the record would get and the puts that make
    /// it visible. Callers combine the puts of several logs into one
    /// `put_many` when a single call must commit them together.
    pub(crate) fn stage_append(&self, bytes: &[u8]) -> Result<(u64, Vec<(Vec<u8>, Vec<u8>)>)> {
        let meta = self.read_meta()?;
        let index = meta.next_index;
        let next = LogMeta {
            next_index: index + 1,
        };
        let puts = vec![
            (entry_key(self.region, index), bytes.to_vec()),
            (meta_key(self.region), bincode::serialize(&next)?),
        ];
        Ok((index, puts))
    }

    /// Read the record at `index`, if the index was ever assigned
    pub fn get(&self, index: u64) -> Result<Option<Vec<u8>>> {
        let meta = self.read_meta()?;
        if index >= meta.next_index {
            return Ok(None);
        }
        self.store.get(&entry_key(self.region, index))
    }

    /// Replace the record at an existing index (migration only)
    pub fn rewrite(&self, index: u64, bytes: &[u8]) -> Result<()> {
        let meta = self.read_meta()?;
        if index >= meta.next_index {
            return Err(Error::KeyNotFound(format!(
                "{} index {index} (len {})",
                self.name, meta.next_index
            )));
        }
        self.store.put(&entry_key(self.region, index), bytes)
    }

    /// Snapshot of all records in insertion order
    pub fn iter_all(&self) -> Result<Vec<(u64, Vec<u8>)>> {
        let meta = self.read_meta()?;
        let mut records = Vec::with_capacity(meta.next_index as usize);
        for index in 0..meta.next_index {
            let bytes = self.store.get(&entry_key(self.region, index))?.ok_or_else(|| {
                Error::Corruption(format!("{} entry {index} missing below next_index", self.name))
            })?;
            records.push((index, bytes));
        }
        Ok(records)
    }

    /// Delete every record and the existence marker
    ///
    /// After this the collection reads as removed, not empty.
    pub fn destroy(&self) -> Result<()> {
        let meta = self.read_meta()?;
        for index in 0..meta.next_index {
            self.store.delete(&entry_key(self.region, index))?;
        }
        self.store.delete(&meta_key(self.region))?;
        Ok(())
    }

    fn read_meta(&self) -> Result<LogMeta> {
        match self.store.get(&meta_key(self.region))? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| Error::Corruption(format!("{} meta: {e}", self.name))),
            None => Err(Error::StoreUnavailable(self.name.to_string())),
        }
    }

    fn write_meta(&self, meta: LogMeta) -> Result<()> {
        let bytes = bincode::serialize(&meta)?;
        self.store.put(&meta_key(self.region), &bytes)
    }
}
