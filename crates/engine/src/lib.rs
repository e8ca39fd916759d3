//! Contract engine for ledgerbook
//!
//! Composes the layers below into the contract surface:
//! - [`log::RecordLog`]: the durable ordered record collection
//! - [`guestbook::GuestBook`]: entry-point logic over the store
//! - [`migrate`]: the explicit, idempotence-guarded migration routine
//! - [`upgrade`] / [`runtime::Runtime`]: code images and the
//!   self-replacing-code upgrade controller

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod guestbook;
pub mod log;
pub mod migrate;
pub mod runtime;
pub mod upgrade;

pub use guestbook::{GuestBook, POINT_ONE};
pub use log::RecordLog;
pub use runtime::Runtime;
pub use upgrade::{
    AuthorizationMode, CodeImage, Lineage, MigrationMode, IMAGE_FORMAT_VERSION, IMAGE_HEADER_LEN,
    IMAGE_MAGIC,
};
