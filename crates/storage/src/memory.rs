//! MemoryStore: BTreeMap-backed storage for tests and ephemeral use
//!
//! `BTreeMap` keeps keys byte-ordered, so `scan_prefix` falls out of a
//! range scan. Interior mutability goes through `parking_lot::RwLock`
//! so the store can be shared via `Arc` like every other backend.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use ledgerbook_core::error::Result;
use ledgerbook_core::traits::Storage;

/// In-memory storage backend
///
/// Not durable: contents are lost on drop. Every operation is
/// infallible in practice, but the `Storage` signatures stay fallible
/// so the engine treats all backends alike.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn put_many(&self, pairs: &[(Vec<u8>, Vec<u8>)]) -> Result<()> {
        let mut data = self.data.write();
        for (key, value) in pairs {
            data.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<bool> {
        Ok(self.data.write().remove(key).is_some())
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.data.read().contains_key(key))
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let data = self.data.read();
        let iter = data.range::<Vec<u8>, _>((Bound::Included(&prefix.to_vec()), Bound::Unbounded));
        Ok(iter
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
