//! GuestBook: the contract state and its entry-point logic
//!
//! All entry points are pure functions of (storage state, caller,
//! arguments, installed generation). Validation happens before the
//! first write and the write path commits through one atomic batch,
//! so a failed call leaves storage untouched.
//!
//! `premium` is computed once, at write time, from the attached
//! payment against a fixed threshold. It is never recomputed, so a
//! later threshold change cannot silently reclassify history.

use std::sync::Arc;

use tracing::debug;

use ledgerbook_core::error::{Error, Result};
use ledgerbook_core::key::MANAGER_KEY;
use ledgerbook_core::limits::Limits;
use ledgerbook_core::traits::Storage;
use ledgerbook_core::types::{AccountId, Amount};
use ledgerbook_schema::codec::{plain, tagged};
use ledgerbook_schema::{
    version, MessageV1, MessageV2, MessageV3, SchemaVersion, SenderKind, VersionedMessage,
};

use crate::log::RecordLog;
use crate::upgrade::Lineage;

/// Premium threshold: one tenth of a token, fixed at write time
pub const POINT_ONE: Amount = Amount::from_milli(100);

/// Contract state facade over the durable store
pub struct GuestBook {
    store: Arc<dyn Storage>,
    limits: Limits,
}

impl GuestBook {
    /// Wrap a storage backend
    pub fn new(store: Arc<dyn Storage>, limits: Limits) -> Self {
        Self { store, limits }
    }

    fn messages(&self) -> RecordLog {
        RecordLog::messages(self.store.clone())
    }

    fn payments(&self) -> RecordLog {
        RecordLog::payments(self.store.clone())
    }

    /// One-time initialization: manager slot, collections, version marker
    pub fn init(
        &self,
        manager: &AccountId,
        lineage: Lineage,
        generation: SchemaVersion,
    ) -> Result<()> {
        if self.store.contains(MANAGER_KEY)? {
            return Err(Error::AlreadyInitialized);
        }

        self.messages().create()?;
        if lineage == Lineage::Coercion && generation == SchemaVersion::V1 {
            self.payments().create()?;
        }
        self.store.put(MANAGER_KEY, manager.as_bytes())?;
        version::write(self.store.as_ref(), generation)?;

        debug!(%manager, ?lineage, %generation, "guest book initialized");
        Ok(())
    }

    /// The manager identity set at `init`
    pub fn manager(&self) -> Result<AccountId> {
        let bytes = self
            .store
            .get(MANAGER_KEY)?
            .ok_or(Error::NotInitialized)?;
        let id = String::from_utf8(bytes)
            .map_err(|_| Error::Corruption("manager slot is not UTF-8".to_string()))?;
        AccountId::new(id).map_err(|e| Error::Corruption(format!("manager slot: {e}")))
    }

    /// Append a record, computing `premium` and the generation shape
    pub fn add_message(
        &self,
        caller: &AccountId,
        text: &str,
        attached: Amount,
        lineage: Lineage,
        generation: SchemaVersion,
    ) -> Result<u64> {
        let manager = self.manager()?;
        self.limits.check_text(text)?;

        let premium = attached >= POINT_ONE;
        let bytes = match (lineage, generation) {
            (Lineage::Coercion, SchemaVersion::V1) => plain::encode_v1(&MessageV1 {
                premium,
                sender: caller.clone(),
                text: text.to_string(),
            })?,
            (Lineage::Coercion, SchemaVersion::V2) => plain::encode_v2(&MessageV2 {
                payment: attached,
                premium,
                sender: caller.clone(),
                text: text.to_string(),
            })?,
            (Lineage::Coercion, SchemaVersion::V3) => {
                return Err(Error::InvalidImage(
                    "coercion lineage has no V3 generation".to_string(),
                ))
            }
            (Lineage::Tagged, SchemaVersion::V1) => {
                tagged::encode(&VersionedMessage::V1(MessageV1 {
                    premium,
                    sender: caller.clone(),
                    text: text.to_string(),
                }))?
            }
            (Lineage::Tagged, SchemaVersion::V2) => {
                tagged::encode(&VersionedMessage::V2(MessageV2 {
                    payment: attached,
                    premium,
                    sender: caller.clone(),
                    text: text.to_string(),
                }))?
            }
            (Lineage::Tagged, SchemaVersion::V3) => {
                let sender_kind = if *caller == manager {
                    SenderKind::Manager
                } else {
                    SenderKind::Ordinary
                };
                tagged::encode(&VersionedMessage::V3(MessageV3 {
                    payment: attached,
                    premium,
                    sender: caller.clone(),
                    sender_kind,
                    text: text.to_string(),
                }))?
            }
        };

        // V1 of the coercion lineage tracks payments in the side
        // channel; record and payment commit as one atomic batch so a
        // failure cannot leave a message without its payment
        let (index, mut puts) = self.messages().stage_append(&bytes)?;
        if lineage == Lineage::Coercion && generation == SchemaVersion::V1 {
            let (_, payment_puts) = self.payments().stage_append(&bincode::serialize(&attached)?)?;
            puts.extend(payment_puts);
        }
        self.store.put_many(&puts)?;

        debug!(index, %caller, premium, "message appended");
        Ok(index)
    }

    /// Full snapshot of all records, insertion order, uniform view
    pub fn get_messages(&self, lineage: Lineage) -> Result<Vec<MessageV3>> {
        self.manager()?;
        let records = self.messages().iter_all()?;
        let mut out = Vec::with_capacity(records.len());
        for (_, bytes) in records {
            let view = match lineage {
                Lineage::Coercion => plain::decode(&bytes)?.into(),
                Lineage::Tagged => tagged::decode(&bytes)?.into(),
            };
            out.push(view);
        }
        Ok(out)
    }

    /// Paginated view over the same snapshot
    pub fn get_messages_page(
        &self,
        lineage: Lineage,
        from_index: u64,
        limit: u64,
    ) -> Result<Vec<MessageV3>> {
        Ok(self
            .get_messages(lineage)?
            .into_iter()
            .skip(from_index as usize)
            .take(limit as usize)
            .collect())
    }

    /// Snapshot of the payments side channel
    ///
    /// Fails with `StoreUnavailable` once migration has removed it:
    /// removed and empty are distinct, caller-visible states.
    pub fn get_payments(&self) -> Result<Vec<Amount>> {
        self.manager()?;
        let records = self.payments().iter_all()?;
        let mut out = Vec::with_capacity(records.len());
        for (index, bytes) in records {
            let amount: Amount = bincode::deserialize(&bytes)
                .map_err(|e| Error::Corruption(format!("payment entry {index}: {e}")))?;
            out.push(amount);
        }
        Ok(out)
    }

    /// Paginated view over the payments side channel
    pub fn get_payments_page(&self, from_index: u64, limit: u64) -> Result<Vec<Amount>> {
        Ok(self
            .get_payments()?
            .into_iter()
            .skip(from_index as usize)
            .take(limit as usize)
            .collect())
    }
}
