//! Privileged-caller and image-validation checks on the upgrade path

use crate::common::*;
use ledgerbook::{Amount, Error, Lineage, SchemaVersion};

#[test]
fn test_non_manager_update_rejected_with_no_replacement() {
    let mut book = deployed(Lineage::Coercion, SchemaVersion::V1);
    book.add_message(&bob(), "hi", Amount::zero()).unwrap();

    let err = book
        .update_contract(&mallory(), &image_bytes(Lineage::Coercion, SchemaVersion::V2))
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }));

    // No code replacement happened: still V1 behavior, side channel live
    assert_eq!(book.current_image().generation, SchemaVersion::V1);
    assert!(book.get_payments().is_ok());
}

#[test]
fn test_non_manager_migrate_rejected() {
    let mut book = deployed(Lineage::Coercion, SchemaVersion::V1);
    book.update_contract(&alice(), &image_bytes(Lineage::Coercion, SchemaVersion::V2))
        .unwrap();
    assert!(matches!(
        book.migrate(&bob()),
        Err(Error::Unauthorized { .. })
    ));
    // The rejected call changed nothing
    assert_eq!(book.schema_version().unwrap(), SchemaVersion::V1);
}

#[test]
fn test_malformed_images_rejected() {
    let mut book = deployed(Lineage::Coercion, SchemaVersion::V1);

    for bytes in [
        &b""[..],
        &b"short"[..],
        &b"XXXX\x01\x00\x02\x00\x00\x00\x00\x00\x00\x00\x00"[..],
    ] {
        let err = book.update_contract(&alice(), bytes).unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)), "accepted {bytes:?}");
        assert_eq!(book.current_image().generation, SchemaVersion::V1);
    }
}

#[test]
fn test_checksum_tampered_image_rejected() {
    let mut book = deployed(Lineage::Coercion, SchemaVersion::V1);
    let mut bytes = image_bytes(Lineage::Coercion, SchemaVersion::V2);
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;

    assert!(matches!(
        book.update_contract(&alice(), &bytes),
        Err(Error::InvalidImage(_))
    ));
    assert_eq!(book.current_image().generation, SchemaVersion::V1);
}

#[test]
fn test_unauthorized_error_names_the_caller() {
    let mut book = deployed(Lineage::Coercion, SchemaVersion::V1);
    let err = book
        .update_contract(&mallory(), &image_bytes(Lineage::Coercion, SchemaVersion::V2))
        .unwrap_err();
    assert!(err.to_string().contains("mallory"));
}
