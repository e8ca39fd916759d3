//! Error types for the ledgerbook store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The taxonomy follows the call-boundary contract: every failed call
//! surfaces one of these variants to the caller and leaves storage
//! exactly as it was before the call.

use std::io;
use thiserror::Error;

/// Result type alias for ledgerbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ledgerbook store
#[derive(Debug, Error)]
pub enum Error {
    /// Caller lacks the identity required for a privileged operation
    #[error("Unauthorized: caller '{caller}' is not the manager")]
    Unauthorized {
        /// Identity that attempted the call
        caller: String,
    },

    /// `init` was called on an already-initialized contract
    #[error("Already initialized")]
    AlreadyInitialized,

    /// An entry point other than `init` was called before `init`
    #[error("Not initialized: call init first")]
    NotInitialized,

    /// The migration routine was invoked after it already completed
    #[error("Already migrated: stored schema is at or past the target generation")]
    AlreadyMigrated,

    /// A collection that migration has removed (or never created) was accessed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Malformed or rejected code image handed to the upgrade controller
    #[error("Invalid code image: {0}")]
    InvalidImage(String),

    /// Key not found in storage
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Stored bytes could not be decoded back into a known shape
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A configured limit was exceeded by the caller's input
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Account identity failed validation
    #[error("Invalid account id: {0}")]
    InvalidAccount(String),

    /// I/O error (journal file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
