//! Core types and traits for ledgerbook
//!
//! This crate defines the foundational pieces used throughout the
//! system:
//! - Amount / AccountId: value types with construction-time validation
//! - Error: the error taxonomy every call surfaces
//! - key: the persistent keyspace layout (regions + reserved slots)
//! - Limits: validated configuration for the contract surface
//! - Storage: the host key-value primitive, as a trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod limits;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use limits::Limits;
pub use traits::Storage;
pub use types::{AccountId, Amount, MAX_ACCOUNT_BYTES, UNITS_PER_MILLI, UNITS_PER_TOKEN};
