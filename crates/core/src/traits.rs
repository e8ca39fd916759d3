//! Storage abstraction for the host key-value primitive
//!
//! The execution environment provides a durable, deterministic
//! key-value store; this trait is its interface. Implementations
//! (in-memory, file-journal) are swappable without touching the
//! schema or engine layers.

use crate::error::Result;

/// Durable key-value storage primitive
///
/// The call model is serialized at the contract boundary, but
/// implementations are still `Send + Sync` so a backend can be shared
/// through an `Arc` the way every layer above expects.
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`, if any
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, overwriting any previous value
    ///
    /// A successful return means the write is durably committed;
    /// backends must not buffer or batch.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Store several pairs as one atomic unit
    ///
    /// Either every pair is durably committed or none are; a failed
    /// call leaves the store exactly as it was. Callers rely on this
    /// when one logical operation spans more than one key.
    fn put_many(&self, pairs: &[(Vec<u8>, Vec<u8>)]) -> Result<()>;

    /// Delete `key`; returns whether a value existed
    fn delete(&self, key: &[u8]) -> Result<bool>;

    /// Whether `key` currently holds a value
    fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// All pairs whose key starts with `prefix`, in byte key order
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;
}
