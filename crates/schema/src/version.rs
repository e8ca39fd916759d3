//! Persisted schema-version marker
//!
//! A single reserved slot records which schema generation the stored
//! data conforms to. The marker was introduced after V1 shipped, so an
//! absent slot decodes as V1. Only `init` and the migration routine
//! may write it.

use ledgerbook_core::error::{Error, Result};
use ledgerbook_core::key::VERSION_KEY;
use ledgerbook_core::traits::Storage;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Schema generation of the stored records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// First generation: premium/sender/text, payments in the side channel
    V1,
    /// Second generation: payment folded into the record
    V2,
    /// Third generation: sender-kind axis
    V3,
}

impl SchemaVersion {
    /// Wire byte used in code-image headers
    pub fn as_byte(self) -> u8 {
        match self {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
            SchemaVersion::V3 => 3,
        }
    }

    /// Parse a code-image header byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(SchemaVersion::V1),
            2 => Some(SchemaVersion::V2),
            3 => Some(SchemaVersion::V3),
            _ => None,
        }
    }

    /// The generation after this one, if any
    pub fn next(self) -> Option<Self> {
        match self {
            SchemaVersion::V1 => Some(SchemaVersion::V2),
            SchemaVersion::V2 => Some(SchemaVersion::V3),
            SchemaVersion::V3 => None,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => f.write_str("V1"),
            SchemaVersion::V2 => f.write_str("V2"),
            SchemaVersion::V3 => f.write_str("V3"),
        }
    }
}

/// Read the persisted marker; an absent slot is V1
pub fn read(store: &dyn Storage) -> Result<SchemaVersion> {
    match store.get(VERSION_KEY)? {
        Some(bytes) => bincode::deserialize(&bytes)
            .map_err(|e| Error::Corruption(format!("schema version marker: {e}"))),
        None => Ok(SchemaVersion::V1),
    }
}

/// Persist the marker
pub fn write(store: &dyn Storage, version: SchemaVersion) -> Result<()> {
    let bytes = bincode::serialize(&version)?;
    store.put(VERSION_KEY, &bytes)?;
    info!(%version, "schema version marker written");
    Ok(())
}
