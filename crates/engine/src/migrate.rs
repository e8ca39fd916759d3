//! Migration routine: reconcile stored records with the installed generation
//!
//! Invoked explicitly, once per upgrade boundary. Idempotence is
//! enforced here: the schema-version marker is only advanced after the
//! whole pass completes, and a second invocation fails with
//! `AlreadyMigrated` before touching storage.
//!
//! ## Fold migration (coercion lineage, V1 -> V2)
//!
//! One pass over the record log. Records lacking the `payment` field
//! are rewritten in place with the side-channel amount at the same
//! index (absent entry reads as zero); records that already carry the
//! field — written by the V2 write path before migration ran — are
//! left alone. Each rewrite is a single put, so interruption never
//! leaves a half-written record. A cursor slot persisted after every
//! record makes the pass resumable: re-invocation after a mid-pass
//! failure continues where it stopped instead of double-applying.
//! After the pass the side channel is destroyed, entries and existence
//! marker both.
//!
//! ## Partial migration (tagged lineage)
//!
//! No bulk rewrite. The marker advances so the write path emits the
//! new variant; reads keep answering uniformly through tagged decoding
//! and upward coercion.

use std::sync::Arc;

use tracing::info;

use ledgerbook_core::error::{Error, Result};
use ledgerbook_core::key::MIGRATION_CURSOR_KEY;
use ledgerbook_core::traits::Storage;
use ledgerbook_core::types::Amount;
use ledgerbook_schema::codec::plain;
use ledgerbook_schema::{version, MessageV2, SchemaVersion};

use crate::log::RecordLog;
use crate::upgrade::Lineage;

/// Run the migration appropriate for `lineage` toward `target`
///
/// Returns the schema version the store now conforms to.
pub fn run(store: &Arc<dyn Storage>, lineage: Lineage, target: SchemaVersion) -> Result<SchemaVersion> {
    let current = version::read(store.as_ref())?;
    let resuming = store.contains(MIGRATION_CURSOR_KEY)?;
    if current >= target && !resuming {
        return Err(Error::AlreadyMigrated);
    }

    info!(%current, %target, ?lineage, resuming, "migration starting");

    match lineage {
        Lineage::Coercion => {
            let rewritten = fold_payments(store)?;
            version::write(store.as_ref(), SchemaVersion::V2)?;
            info!(rewritten, "fold migration complete, side channel removed");
            Ok(SchemaVersion::V2)
        }
        Lineage::Tagged => {
            version::write(store.as_ref(), target)?;
            info!(%target, "partial migration complete, write path switched");
            Ok(target)
        }
    }
}

/// One resumable pass folding side-channel payments into the records
///
/// Returns the number of records rewritten by this invocation.
fn fold_payments(store: &Arc<dyn Storage>) -> Result<u64> {
    let messages = RecordLog::messages(store.clone());
    let payments = RecordLog::payments(store.clone());

    if !messages.exists()? {
        return Err(Error::StoreUnavailable("messages".to_string()));
    }

    let cursor = read_cursor(store.as_ref())?;
    if !payments.exists()? && cursor.is_none() {
        // A previous run may have been interrupted between destroying
        // the side channel and advancing the marker; that state is
        // recognizable because every record already carries `payment`.
        for (_, bytes) in messages.iter_all()? {
            if !plain::has_payment_field(&bytes)? {
                return Err(Error::StoreUnavailable("payments".to_string()));
            }
        }
        store.delete(MIGRATION_CURSOR_KEY)?;
        return Ok(0);
    }

    let start = cursor.unwrap_or(0);
    let len = messages.len()?;
    let mut rewritten = 0u64;

    for index in start..len {
        let raw = messages.get(index)?.ok_or_else(|| {
            Error::Corruption(format!("message entry {index} missing during migration"))
        })?;

        if !plain::has_payment_field(&raw)? {
            let payment = match payments.get(index)? {
                Some(bytes) => bincode::deserialize(&bytes)
                    .map_err(|e| Error::Corruption(format!("payment entry {index}: {e}")))?,
                None => Amount::zero(),
            };
            let old = plain::decode(&raw)?;
            let new = MessageV2 {
                payment,
                premium: old.premium,
                sender: old.sender,
                text: old.text,
            };
            messages.rewrite(index, &plain::encode_v2(&new)?)?;
            rewritten += 1;
        }

        write_cursor(store.as_ref(), index + 1)?;
    }

    if payments.exists()? {
        payments.destroy()?;
    }
    store.delete(MIGRATION_CURSOR_KEY)?;
    Ok(rewritten)
}

fn read_cursor(store: &dyn Storage) -> Result<Option<u64>> {
    match store.get(MIGRATION_CURSOR_KEY)? {
        Some(bytes) => bincode::deserialize(&bytes)
            .map(Some)
            .map_err(|e| Error::Corruption(format!("migration cursor: {e}"))),
        None => Ok(None),
    }
}

fn write_cursor(store: &dyn Storage, next: u64) -> Result<()> {
    store.put(MIGRATION_CURSOR_KEY, &bincode::serialize(&next)?)
}
