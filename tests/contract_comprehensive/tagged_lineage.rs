//! Tagged-variant lineage: partial migration, coexisting shapes
//!
//! No bulk rewrite ever happens here. Records written before and after
//! each upgrade coexist in the collection and answer uniformly through
//! the same read API, with generation-only fields defaulting to fixed
//! neutral values.

use crate::common::*;
use ledgerbook::{Amount, Error, Lineage, SchemaVersion, SenderKind};

#[test]
fn test_old_and_new_records_decode_through_one_read_api() {
    let mut book = deployed(Lineage::Tagged, SchemaVersion::V1);
    book.add_message(&bob(), "before", Amount::from_milli(100)).unwrap();

    book.update_contract(&alice(), &image_bytes(Lineage::Tagged, SchemaVersion::V2))
        .unwrap();
    book.migrate(&alice()).unwrap();

    book.add_message(&bob(), "after", Amount::from_milli(100)).unwrap();

    let messages = book.get_messages().unwrap();
    assert_eq!(messages.len(), 2);

    // The V1 record predates `payment`: fixed neutral default, no error
    assert!(messages[0].payment.is_zero());
    assert!(messages[0].premium);
    assert_eq!(messages[0].text, "before");

    // The V2 record carries its payment
    assert_eq!(messages[1].payment, Amount::from_milli(100));
    assert_eq!(messages[1].text, "after");
}

#[test]
fn test_partial_migration_rewrites_nothing() {
    let mut book = deployed(Lineage::Tagged, SchemaVersion::V1);
    book.add_message(&bob(), "kept", Amount::from_milli(100)).unwrap();

    book.update_contract(&alice(), &image_bytes(Lineage::Tagged, SchemaVersion::V2))
        .unwrap();
    book.migrate(&alice()).unwrap();

    // Even after a second upgrade the V1 record still reads with its
    // original premium flag and a defaulted payment.
    book.update_contract(&alice(), &image_bytes(Lineage::Tagged, SchemaVersion::V3))
        .unwrap();
    book.migrate(&alice()).unwrap();

    let messages = book.get_messages().unwrap();
    assert!(messages[0].premium);
    assert!(messages[0].payment.is_zero());
    assert_eq!(messages[0].sender_kind, SenderKind::Ordinary);
}

#[test]
fn test_v3_sender_kind_axis() {
    let mut book = deployed(Lineage::Tagged, SchemaVersion::V2);
    book.add_message(&bob(), "v2 era", Amount::zero()).unwrap();

    book.update_contract(&alice(), &image_bytes(Lineage::Tagged, SchemaVersion::V3))
        .unwrap();
    book.migrate(&alice()).unwrap();

    book.add_message(&bob(), "ordinary", Amount::zero()).unwrap();
    book.add_message(&alice(), "manager", Amount::zero()).unwrap();

    let messages = book.get_messages().unwrap();
    // Pre-V3 records default to Ordinary; V3 writes record the real kind
    assert_eq!(messages[0].sender_kind, SenderKind::Ordinary);
    assert_eq!(messages[1].sender_kind, SenderKind::Ordinary);
    assert_eq!(messages[2].sender_kind, SenderKind::Manager);
}

#[test]
fn test_tagged_lineage_never_has_a_side_channel() {
    let book = deployed(Lineage::Tagged, SchemaVersion::V1);
    book.add_message(&bob(), "x", Amount::from_milli(100)).unwrap();
    assert!(matches!(
        book.get_payments(),
        Err(Error::StoreUnavailable(_))
    ));
}

#[test]
fn test_tagged_migrate_twice_fails() {
    let mut book = deployed(Lineage::Tagged, SchemaVersion::V1);
    book.update_contract(&alice(), &image_bytes(Lineage::Tagged, SchemaVersion::V2))
        .unwrap();
    book.migrate(&alice()).unwrap();
    assert!(matches!(book.migrate(&alice()), Err(Error::AlreadyMigrated)));
}
