//! Record shapes across schema generations
//!
//! Fields are additive only. Once a record is committed its `sender`
//! and `text` never change; migration may add generation-tagged fields
//! but never removes or reorders what an older generation wrote.
//!
//! Upward coercion (`From<VersionedMessage>`) fills fields a record
//! predates with fixed neutral defaults: zero payment, `Ordinary`
//! sender kind. Coercion never recomputes `premium`; it was decided
//! once at write time and stays as written.

use ledgerbook_core::types::{AccountId, Amount};
use serde::{Deserialize, Serialize};

/// Whether the writing account was ordinary or the privileged manager
///
/// Introduced by the self-upgrade lineage's third generation, computed
/// at write time by comparing the caller against the manager slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SenderKind {
    /// Any non-privileged account
    #[default]
    Ordinary,
    /// The manager identity designated at `init`
    Manager,
}

/// First-generation record: premium flag, sender, text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageV1 {
    /// Whether the attached payment met the premium threshold
    pub premium: bool,
    /// Writing account, immutable once committed
    pub sender: AccountId,
    /// User-supplied payload, immutable once committed
    pub text: String,
}

/// Second-generation record: adds the attached payment amount
///
/// `payment` defaults to zero so first-generation bytes decode through
/// this shape (default-value coercion; see `codec::plain`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageV2 {
    /// Payment attached to the write; zero for pre-V2 records until a
    /// fold migration fills it from the side channel
    #[serde(default)]
    pub payment: Amount,
    /// Whether the attached payment met the premium threshold
    pub premium: bool,
    /// Writing account, immutable once committed
    pub sender: AccountId,
    /// User-supplied payload, immutable once committed
    pub text: String,
}

/// Third-generation record: adds the sender-kind axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageV3 {
    /// Payment attached to the write
    #[serde(default)]
    pub payment: Amount,
    /// Whether the attached payment met the premium threshold
    pub premium: bool,
    /// Writing account, immutable once committed
    pub sender: AccountId,
    /// Ordinary or manager, decided at write time
    #[serde(default)]
    pub sender_kind: SenderKind,
    /// User-supplied payload, immutable once committed
    pub text: String,
}

/// Tagged union over all record generations
///
/// Persisted with an explicit discriminant so two shapes can coexist
/// in the same collection indefinitely. The decoder is total over this
/// tag set; there is no structural guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionedMessage {
    /// First generation
    V1(MessageV1),
    /// Second generation
    V2(MessageV2),
    /// Third generation
    V3(MessageV3),
}

impl From<VersionedMessage> for MessageV2 {
    fn from(message: VersionedMessage) -> Self {
        match message {
            VersionedMessage::V1(posted) => MessageV2 {
                payment: Amount::zero(),
                premium: posted.premium,
                sender: posted.sender,
                text: posted.text,
            },
            VersionedMessage::V2(posted) => posted,
            VersionedMessage::V3(posted) => MessageV2 {
                payment: posted.payment,
                premium: posted.premium,
                sender: posted.sender,
                text: posted.text,
            },
        }
    }
}

impl From<VersionedMessage> for MessageV3 {
    fn from(message: VersionedMessage) -> Self {
        match message {
            VersionedMessage::V1(posted) => MessageV3 {
                payment: Amount::zero(),
                premium: posted.premium,
                sender: posted.sender,
                sender_kind: SenderKind::Ordinary,
                text: posted.text,
            },
            VersionedMessage::V2(posted) => MessageV3 {
                payment: posted.payment,
                premium: posted.premium,
                sender: posted.sender,
                sender_kind: SenderKind::Ordinary,
                text: posted.text,
            },
            VersionedMessage::V3(posted) => posted,
        }
    }
}

impl From<MessageV2> for MessageV3 {
    fn from(posted: MessageV2) -> Self {
        MessageV3 {
            payment: posted.payment,
            premium: posted.premium,
            sender: posted.sender,
            sender_kind: SenderKind::Ordinary,
            text: posted.text,
        }
    }
}
