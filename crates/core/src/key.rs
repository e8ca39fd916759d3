//! Keyspace layout for the persistent store
//!
//! The contract's durable state lives in two independent keyed
//! regions plus a handful of reserved singleton slots:
//!
//! - message entries:  `m:<index as 8-byte BE>` with meta `m:__meta__`
//! - payment entries:  `p:<index as 8-byte BE>` with meta `p:__meta__`
//! - reserved slots:   `_lbk/version`, `_lbk/manager`, `_lbk/cursor`
//!
//! Big-endian index bytes keep entries key-ordered by insertion index
//! under a plain byte-ordered scan.

/// Region prefix for the main record collection
pub const MESSAGES_REGION: &str = "m";

/// Region prefix for the payments side-channel collection
pub const PAYMENTS_REGION: &str = "p";

/// Reserved system prefix for singleton slots
pub const RESERVED_PREFIX: &str = "_lbk/";

/// Slot holding the persisted schema-version marker
pub const VERSION_KEY: &[u8] = b"_lbk/version";

/// Slot holding the manager identity set at `init`
pub const MANAGER_KEY: &[u8] = b"_lbk/manager";

/// Slot holding the resumable migration cursor, present only while a
/// fold migration is in flight
pub const MIGRATION_CURSOR_KEY: &[u8] = b"_lbk/cursor";

/// Suffix of the per-region metadata key
const META_SUFFIX: &[u8] = b"__meta__";

/// Key of one indexed entry inside a region
pub fn entry_key(region: &str, index: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(region.len() + 1 + 8);
    key.extend_from_slice(region.as_bytes());
    key.push(b':');
    key.extend_from_slice(&index.to_be_bytes());
    key
}

/// Metadata key of a region (holds the next index; presence marks existence)
pub fn meta_key(region: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(region.len() + 1 + META_SUFFIX.len());
    key.extend_from_slice(region.as_bytes());
    key.push(b':');
    key.extend_from_slice(META_SUFFIX);
    key
}
