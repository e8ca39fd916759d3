//! Durability: the journal-backed store across process restarts
//!
//! The Runtime is rebuilt from scratch over a reopened JournalStore,
//! the way a redeployed executable would find the state the previous
//! binary left behind.

use std::sync::Arc;

use crate::common::*;
use ledgerbook::{
    Amount, CodeImage, Error, JournalStore, Lineage, Runtime, SchemaVersion, Storage,
};

fn reopen(path: &std::path::Path, lineage: Lineage, generation: SchemaVersion) -> Runtime {
    let store: Arc<dyn Storage> = Arc::new(JournalStore::open(path).unwrap());
    let image = CodeImage::new(lineage, generation, b"executable".to_vec()).unwrap();
    Runtime::new(store, image).unwrap()
}

#[test]
fn test_messages_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.journal");

    {
        let store: Arc<dyn Storage> = Arc::new(JournalStore::open(&path).unwrap());
        let book = deployed_on(store, Lineage::Coercion, SchemaVersion::V1);
        book.add_message(&bob(), "hello", Amount::from_milli(90)).unwrap();
        book.add_message(&alice(), "bye", Amount::from_milli(100)).unwrap();
    }

    let book = reopen(&path, Lineage::Coercion, SchemaVersion::V1);
    let messages = book.get_messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text, "hello");
    assert_eq!(book.get_payments().unwrap().len(), 2);
    assert_eq!(book.manager().unwrap(), alice());
}

#[test]
fn test_upgrade_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.journal");

    // First deployment: V1 binary writes two records
    {
        let store: Arc<dyn Storage> = Arc::new(JournalStore::open(&path).unwrap());
        let book = deployed_on(store, Lineage::Coercion, SchemaVersion::V1);
        book.add_message(&bob(), "hello", Amount::from_milli(90)).unwrap();
        book.add_message(&alice(), "bye", Amount::from_milli(100)).unwrap();
    }

    // Second deployment: the V2 binary migrates the old state
    {
        let book = reopen(&path, Lineage::Coercion, SchemaVersion::V2);
        assert_eq!(book.schema_version().unwrap(), SchemaVersion::V1);
        book.migrate(&alice()).unwrap();
    }

    // Third open: migrated state is durable
    let book = reopen(&path, Lineage::Coercion, SchemaVersion::V2);
    assert_eq!(book.schema_version().unwrap(), SchemaVersion::V2);
    let messages = book.get_messages().unwrap();
    assert_eq!(messages[0].payment.as_raw(), 90_000_000_000_000_000_000_000);
    assert_eq!(messages[1].payment.as_raw(), 100_000_000_000_000_000_000_000);
    assert!(matches!(
        book.get_payments(),
        Err(Error::StoreUnavailable(_))
    ));
}

#[test]
fn test_migrated_marker_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.journal");

    {
        let store: Arc<dyn Storage> = Arc::new(JournalStore::open(&path).unwrap());
        let book = deployed_on(store, Lineage::Tagged, SchemaVersion::V1);
        book.add_message(&bob(), "x", Amount::zero()).unwrap();
    }
    {
        let book = reopen(&path, Lineage::Tagged, SchemaVersion::V2);
        book.migrate(&alice()).unwrap();
    }

    let book = reopen(&path, Lineage::Tagged, SchemaVersion::V2);
    assert!(matches!(book.migrate(&alice()), Err(Error::AlreadyMigrated)));
}
