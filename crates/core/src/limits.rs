//! Configurable limits enforced at the contract surface
//!
//! Limits are validated once when constructed; a `Limits` value in
//! hand is always internally consistent.

use crate::error::{Error, Result};

/// Default maximum byte length of a message text
pub const DEFAULT_MAX_TEXT_BYTES: usize = 4 * 1024;

/// Default maximum byte length of an uploaded code image
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Limits enforced by the contract surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum byte length of a message text
    pub max_text_bytes: usize,
    /// Maximum byte length of a code image accepted by `update_contract`
    pub max_image_bytes: usize,
}

impl Limits {
    /// Validate a limits configuration
    ///
    /// Zero limits are rejected: they would make every call fail, which
    /// is never what a deployment intends.
    pub fn validate(&self) -> Result<()> {
        if self.max_text_bytes == 0 {
            return Err(Error::LimitExceeded(
                "max_text_bytes must be non-zero".to_string(),
            ));
        }
        if self.max_image_bytes == 0 {
            return Err(Error::LimitExceeded(
                "max_image_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Check a message text against the configured limit
    pub fn check_text(&self, text: &str) -> Result<()> {
        if text.len() > self.max_text_bytes {
            return Err(Error::LimitExceeded(format!(
                "text is {} bytes, max {}",
                text.len(),
                self.max_text_bytes
            )));
        }
        Ok(())
    }

    /// Check a code image against the configured limit
    pub fn check_image(&self, image: &[u8]) -> Result<()> {
        if image.len() > self.max_image_bytes {
            return Err(Error::InvalidImage(format!(
                "image is {} bytes, max {}",
                image.len(),
                self.max_image_bytes
            )));
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}
