//! Schema variant layer for ledgerbook
//!
//! Defines the closed set of record shapes that may appear in the
//! durable collection over the contract's lifetime, the two codecs
//! that let a reader discriminate between them (default-value coercion
//! and explicit tagged variants), and the persisted schema-version
//! marker that migrations advance.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod message;
pub mod version;

pub use message::{MessageV1, MessageV2, MessageV3, SenderKind, VersionedMessage};
pub use version::SchemaVersion;
