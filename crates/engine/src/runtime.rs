//! Runtime: the current-executable resource and call dispatch
//!
//! The runtime owns the installed [`CodeImage`] and routes every entry
//! point through it: the image's generation decides which record shape
//! the write path produces, its lineage decides how reads decode. The
//! upgrade controller is the only place the image changes, and the
//! swap plus the optional bundled migration are one logical operation
//! from the caller's perspective.

use std::sync::Arc;

use tracing::info;

use ledgerbook_core::error::{Error, Result};
use ledgerbook_core::limits::Limits;
use ledgerbook_core::traits::Storage;
use ledgerbook_core::types::{AccountId, Amount};
use ledgerbook_schema::{version, MessageV3, SchemaVersion};

use crate::guestbook::GuestBook;
use crate::migrate;
use crate::upgrade::{AuthorizationMode, CodeImage, MigrationMode};

/// Contract runtime: storage plus the currently installed code image
pub struct Runtime {
    store: Arc<dyn Storage>,
    book: GuestBook,
    image: CodeImage,
    limits: Limits,
    migration_mode: MigrationMode,
    authorization: AuthorizationMode,
}

impl Runtime {
    /// Create a runtime with an initial image and default modes
    /// (self-managed authorization, explicit migration)
    pub fn new(store: Arc<dyn Storage>, image: CodeImage) -> Result<Self> {
        Self::with_config(
            store,
            image,
            Limits::default(),
            MigrationMode::default(),
            AuthorizationMode::default(),
        )
    }

    /// Create a runtime with explicit configuration
    pub fn with_config(
        store: Arc<dyn Storage>,
        image: CodeImage,
        limits: Limits,
        migration_mode: MigrationMode,
        authorization: AuthorizationMode,
    ) -> Result<Self> {
        limits.validate()?;
        let book = GuestBook::new(store.clone(), limits.clone());
        Ok(Self {
            store,
            book,
            image,
            limits,
            migration_mode,
            authorization,
        })
    }

    /// The currently installed image
    pub fn current_image(&self) -> &CodeImage {
        &self.image
    }

    /// The schema version the stored data conforms to
    pub fn schema_version(&self) -> Result<SchemaVersion> {
        version::read(self.store.as_ref())
    }

    /// One-time initialization
    pub fn init(&self, manager: &AccountId) -> Result<()> {
        self.book
            .init(manager, self.image.lineage, self.image.generation)
    }

    /// The manager identity
    pub fn manager(&self) -> Result<AccountId> {
        self.book.manager()
    }

    /// Append a message with an attached payment
    pub fn add_message(&self, caller: &AccountId, text: &str, attached: Amount) -> Result<u64> {
        self.book
            .add_message(caller, text, attached, self.image.lineage, self.image.generation)
    }

    /// Full ordered snapshot of all messages
    pub fn get_messages(&self) -> Result<Vec<MessageV3>> {
        self.book.get_messages(self.image.lineage)
    }

    /// Paginated message snapshot
    pub fn get_messages_page(&self, from_index: u64, limit: u64) -> Result<Vec<MessageV3>> {
        self.book
            .get_messages_page(self.image.lineage, from_index, limit)
    }

    /// Ordered snapshot of the payments side channel
    pub fn get_payments(&self) -> Result<Vec<Amount>> {
        self.book.get_payments()
    }

    /// Paginated payments snapshot
    pub fn get_payments_page(&self, from_index: u64, limit: u64) -> Result<Vec<Amount>> {
        self.book.get_payments_page(from_index, limit)
    }

    /// Explicit migration call, restricted to the manager
    pub fn migrate(&self, caller: &AccountId) -> Result<SchemaVersion> {
        self.require_manager(caller)?;
        migrate::run(&self.store, self.image.lineage, self.image.generation)
    }

    /// Replace the running code image and, per configuration, migrate
    ///
    /// The caller check happens before the image is even parsed, so an
    /// unauthorized call performs no code replacement and leaves no
    /// trace. A malformed image is rejected without being installed.
    pub fn update_contract(&mut self, caller: &AccountId, image_bytes: &[u8]) -> Result<()> {
        if self.authorization == AuthorizationMode::SelfManaged {
            self.require_manager(caller)?;
        }

        let new_image = CodeImage::parse(image_bytes, &self.limits)?;
        if new_image.lineage != self.image.lineage {
            return Err(Error::InvalidImage(format!(
                "lineage mismatch: contract follows {:?}, image declares {:?}",
                self.image.lineage, new_image.lineage
            )));
        }
        if new_image.generation <= self.image.generation {
            return Err(Error::InvalidImage(format!(
                "image generation {} does not advance past installed {}",
                new_image.generation, self.image.generation
            )));
        }

        let old_generation = self.image.generation;
        self.image = new_image;
        info!(
            from = %old_generation,
            to = %self.image.generation,
            "code image replaced"
        );

        if self.migration_mode == MigrationMode::Bundled {
            migrate::run(&self.store, self.image.lineage, self.image.generation)?;
        }
        Ok(())
    }

    fn require_manager(&self, caller: &AccountId) -> Result<()> {
        let manager = self.book.manager()?;
        if *caller != manager {
            return Err(Error::Unauthorized {
                caller: caller.to_string(),
            });
        }
        Ok(())
    }
}
