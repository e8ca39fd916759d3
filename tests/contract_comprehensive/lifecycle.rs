//! Initialization and basic entry-point lifecycle

use crate::common::*;
use ledgerbook::{Amount, Error, Lineage, SchemaVersion};

#[test]
fn test_init_twice_fails() {
    let book = deployed(Lineage::Coercion, SchemaVersion::V1);
    assert!(matches!(book.init(&bob()), Err(Error::AlreadyInitialized)));
    assert_eq!(book.manager().unwrap(), alice());
}

#[test]
fn test_calls_before_init_rejected() {
    use ledgerbook::{CodeImage, MemoryStore, Runtime, Storage};
    use std::sync::Arc;

    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let image = CodeImage::new(Lineage::Coercion, SchemaVersion::V1, Vec::new()).unwrap();
    let book = Runtime::new(store, image).unwrap();

    assert!(matches!(
        book.add_message(&bob(), "hi", Amount::zero()),
        Err(Error::NotInitialized)
    ));
    assert!(matches!(book.get_messages(), Err(Error::NotInitialized)));
    assert!(matches!(book.manager(), Err(Error::NotInitialized)));
}

#[test]
fn test_immutable_fields_round_trip_verbatim() {
    let book = deployed(Lineage::Tagged, SchemaVersion::V2);
    book.add_message(&bob(), "exact text, with punctuation!", Amount::from_milli(42))
        .unwrap();

    let messages = book.get_messages().unwrap();
    assert_eq!(messages[0].sender, bob());
    assert_eq!(messages[0].text, "exact text, with punctuation!");
    assert_eq!(messages[0].payment, Amount::from_milli(42));
}

#[test]
fn test_pagination_windows() {
    let book = deployed(Lineage::Coercion, SchemaVersion::V1);
    for i in 0..7 {
        book.add_message(&bob(), &format!("m{i}"), Amount::from_milli(i)).unwrap();
    }

    let page = book.get_messages_page(2, 3).unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].text, "m2");
    assert_eq!(page[2].text, "m4");

    let payments = book.get_payments_page(5, 10).unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0], Amount::from_milli(5));

    // Past the end: empty page, not an error
    assert!(book.get_messages_page(100, 10).unwrap().is_empty());
}

#[test]
fn test_failed_call_leaves_storage_untouched() {
    let book = deployed(Lineage::Coercion, SchemaVersion::V1);
    book.add_message(&bob(), "ok", Amount::zero()).unwrap();

    // Oversized text fails validation before any write
    let huge = "x".repeat(1024 * 1024);
    assert!(matches!(
        book.add_message(&bob(), &huge, Amount::zero()),
        Err(Error::LimitExceeded(_))
    ));

    assert_eq!(book.get_messages().unwrap().len(), 1);
    assert_eq!(book.get_payments().unwrap().len(), 1);
}
