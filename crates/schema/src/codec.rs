//! Record codecs, one per lineage
//!
//! Two strategies for letting heterogeneous record shapes coexist in
//! the durable collection:
//!
//! - [`plain`] (default-value coercion): records are stored as JSON
//!   objects with fields only ever appended. The V2 decoder reads V1
//!   bytes by treating the absent `payment` field as zero. The
//!   steady-state uniform shape is produced by a fold migration that
//!   physically rewrites every record.
//! - [`tagged`] (explicit variant): records are stored as a
//!   [`VersionedMessage`] with its discriminant. Old and new shapes
//!   coexist indefinitely; reads answer uniformly through upward
//!   coercion and no bulk rewrite ever happens.
//!
//! Encode failures surface as `Serialization`, decode failures as
//! `Corruption`. The decoders never panic on stored bytes.

use ledgerbook_core::error::{Error, Result};

use crate::message::{MessageV1, MessageV2, VersionedMessage};

/// Default-value coercion codec (plain JSON objects, append-only fields)
pub mod plain {
    use super::*;

    /// Encode a first-generation record
    pub fn encode_v1(message: &MessageV1) -> Result<Vec<u8>> {
        serde_json::to_vec(message).map_err(Error::from)
    }

    /// Encode a second-generation record
    pub fn encode_v2(message: &MessageV2) -> Result<Vec<u8>> {
        serde_json::to_vec(message).map_err(Error::from)
    }

    /// Decode stored bytes of either generation through the V2 shape
    ///
    /// V1 bytes are a structural subset of V2 bytes, so the decoder
    /// only has to default the missing `payment` to zero.
    pub fn decode(bytes: &[u8]) -> Result<MessageV2> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Corruption(format!("plain record: {e}")))
    }

    /// Whether stored bytes already carry an explicit `payment` field
    ///
    /// Used by the fold migration to tell rewritten records apart from
    /// ones still awaiting their side-channel value.
    pub fn has_payment_field(bytes: &[u8]) -> Result<bool> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::Corruption(format!("plain record: {e}")))?;
        Ok(value.get("payment").is_some())
    }
}

/// Explicit tagged-variant codec
pub mod tagged {
    use super::*;

    /// Encode a record with its generation discriminant
    pub fn encode(message: &VersionedMessage) -> Result<Vec<u8>> {
        serde_json::to_vec(message).map_err(Error::from)
    }

    /// Decode stored bytes by dispatching on the persisted discriminant
    ///
    /// Total over the known tag set; bytes carrying an unknown tag are
    /// corruption, not a best-effort structural guess.
    pub fn decode(bytes: &[u8]) -> Result<VersionedMessage> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Corruption(format!("tagged record: {e}")))
    }
}
