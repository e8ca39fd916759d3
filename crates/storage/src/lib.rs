//! Storage backends for ledgerbook
//!
//! Two implementations of the host key-value primitive
//! (`ledgerbook_core::Storage`):
//! - [`MemoryStore`]: BTreeMap behind an RwLock, for tests and
//!   ephemeral use
//! - [`JournalStore`]: in-memory map plus an append-only, CRC-framed,
//!   per-write-fsynced journal file replayed on open

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod journal;
pub mod memory;

pub use journal::JournalStore;
pub use memory::MemoryStore;
