//! Ledgerbook - embedded versioned guest-ledger store with live schema migration
//!
//! Ledgerbook is a single-contract ledger ("guestbook") over a durable
//! key-value store. Its reason to exist is schema evolution across
//! binary upgrades while the store stays live: records written under
//! schema V1 remain readable and semantically correct after the
//! executable is replaced by a V2 or V3 build, with no export/reimport
//! step.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use ledgerbook::{
//!     AccountId, Amount, CodeImage, Lineage, MemoryStore, Runtime, SchemaVersion, Storage,
//! };
//!
//! # fn main() -> ledgerbook::Result<()> {
//! let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
//! let image = CodeImage::new(Lineage::Coercion, SchemaVersion::V1, Vec::new())?;
//! let book = Runtime::new(store, image)?;
//!
//! let alice = AccountId::new("alice")?;
//! book.init(&alice)?;
//! book.add_message(&alice, "hello", Amount::from_milli(90))?;
//!
//! let messages = book.get_messages()?;
//! assert!(!messages[0].premium);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Calls enter through [`Runtime`], which dispatches per the installed
//! [`CodeImage`]: its generation decides the record shape the write
//! path produces, its lineage decides how previously-persisted bytes
//! decode. Upgrades replace the image (manager-only) and migrations
//! reconcile stored records with the new generation, either as a
//! separate explicit call or bundled into the swap.

// Re-export the public API from the layered crates
pub use ledgerbook_core::{AccountId, Amount, Error, Limits, Result, Storage};
pub use ledgerbook_engine::{
    AuthorizationMode, CodeImage, GuestBook, Lineage, MigrationMode, RecordLog, Runtime, POINT_ONE,
};
pub use ledgerbook_schema::{
    MessageV1, MessageV2, MessageV3, SchemaVersion, SenderKind, VersionedMessage,
};
pub use ledgerbook_storage::{JournalStore, MemoryStore};
