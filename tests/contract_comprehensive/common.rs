//! Shared fixtures for the contract integration suite

use std::sync::Arc;

use ledgerbook::{
    AccountId, CodeImage, Lineage, MemoryStore, Runtime, SchemaVersion, Storage,
};

/// Route tracing output through the test harness; safe to call from
/// every test, only the first call installs the subscriber
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn alice() -> AccountId {
    AccountId::new("alice").unwrap()
}

pub fn bob() -> AccountId {
    AccountId::new("bob").unwrap()
}

pub fn mallory() -> AccountId {
    AccountId::new("mallory").unwrap()
}

/// Encoded image bytes for an upgrade upload
pub fn image_bytes(lineage: Lineage, generation: SchemaVersion) -> Vec<u8> {
    CodeImage::new(lineage, generation, b"executable".to_vec())
        .unwrap()
        .encode()
}

/// Initialized runtime over a fresh in-memory store, managed by alice
pub fn deployed(lineage: Lineage, generation: SchemaVersion) -> Runtime {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    deployed_on(store, lineage, generation)
}

/// Initialized runtime over a caller-provided store
pub fn deployed_on(
    store: Arc<dyn Storage>,
    lineage: Lineage,
    generation: SchemaVersion,
) -> Runtime {
    init_tracing();
    let image = CodeImage::new(lineage, generation, b"executable".to_vec()).unwrap();
    let runtime = Runtime::new(store, image).unwrap();
    runtime.init(&alice()).unwrap();
    runtime
}
