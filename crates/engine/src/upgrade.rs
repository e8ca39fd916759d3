//! Upgrade controller types: code images, lineages, operation modes
//!
//! A code image is the validated stand-in for the executable the host
//! deploys. Its header declares which lineage the contract follows and
//! which schema generation its write path produces; the body is opaque
//! and covered by an xxh3-64 checksum.
//!
//! ## Image layout
//!
//! ```text
//! magic "LBOK" | format u8 | lineage u8 | generation u8 | xxh3(body) u64 LE | body
//! ```

use ledgerbook_core::error::{Error, Result};
use ledgerbook_core::limits::Limits;
use ledgerbook_schema::SchemaVersion;
use xxhash_rust::xxh3::xxh3_64;

/// Magic bytes at the start of every code image
pub const IMAGE_MAGIC: [u8; 4] = *b"LBOK";

/// Current image header format version
pub const IMAGE_FORMAT_VERSION: u8 = 1;

/// Header length in bytes (magic + format + lineage + generation + checksum)
pub const IMAGE_HEADER_LEN: usize = 4 + 1 + 1 + 1 + 8;

/// Which schema-evolution strategy the contract follows
///
/// The two lineages diverge permanently: a deployment picks one at
/// first deploy and every later image must declare the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lineage {
    /// Default-value coercion with a fold migration (uniform steady state)
    Coercion,
    /// Explicit tagged variants, partial migration, shapes coexist
    Tagged,
}

impl Lineage {
    /// Wire byte used in image headers
    pub fn as_byte(self) -> u8 {
        match self {
            Lineage::Coercion => 0,
            Lineage::Tagged => 1,
        }
    }

    /// Parse an image header byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Lineage::Coercion),
            1 => Some(Lineage::Tagged),
            _ => None,
        }
    }
}

/// When the migration routine runs relative to the code swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MigrationMode {
    /// The caller issues a separate `migrate` call after the swap
    #[default]
    Explicit,
    /// The swap triggers migration as one logical operation
    Bundled,
}

/// Who enforces the privileged-caller check on `update_contract`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationMode {
    /// The contract checks the caller against the stored manager slot
    #[default]
    SelfManaged,
    /// The privileged account is managed outside the contract; no
    /// in-contract check
    External,
}

/// A validated executable image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeImage {
    /// Schema-evolution strategy this image follows
    pub lineage: Lineage,
    /// Generation its write path produces
    pub generation: SchemaVersion,
    /// Opaque executable payload
    pub body: Vec<u8>,
}

impl CodeImage {
    /// Build an image, rejecting lineage/generation combinations that
    /// do not exist (the coercion lineage ends at V2)
    pub fn new(lineage: Lineage, generation: SchemaVersion, body: Vec<u8>) -> Result<Self> {
        if lineage == Lineage::Coercion && generation == SchemaVersion::V3 {
            return Err(Error::InvalidImage(
                "coercion lineage has no V3 generation".to_string(),
            ));
        }
        Ok(Self {
            lineage,
            generation,
            body,
        })
    }

    /// Serialize to the wire layout
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(IMAGE_HEADER_LEN + self.body.len());
        bytes.extend_from_slice(&IMAGE_MAGIC);
        bytes.push(IMAGE_FORMAT_VERSION);
        bytes.push(self.lineage.as_byte());
        bytes.push(self.generation.as_byte());
        bytes.extend_from_slice(&xxh3_64(&self.body).to_le_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }

    /// Parse and validate an uploaded image
    ///
    /// Every rejection is `InvalidImage`; a rejected upload leaves the
    /// currently installed image untouched (the caller never swaps on
    /// error).
    pub fn parse(bytes: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_image(bytes)?;

        if bytes.len() < IMAGE_HEADER_LEN {
            return Err(Error::InvalidImage(format!(
                "image is {} bytes, header alone is {IMAGE_HEADER_LEN}",
                bytes.len()
            )));
        }
        if bytes[0..4] != IMAGE_MAGIC {
            return Err(Error::InvalidImage("bad magic".to_string()));
        }
        if bytes[4] != IMAGE_FORMAT_VERSION {
            return Err(Error::InvalidImage(format!(
                "unknown format version {}",
                bytes[4]
            )));
        }
        let lineage = Lineage::from_byte(bytes[5])
            .ok_or_else(|| Error::InvalidImage(format!("unknown lineage byte {}", bytes[5])))?;
        let generation = SchemaVersion::from_byte(bytes[6])
            .ok_or_else(|| Error::InvalidImage(format!("unknown generation byte {}", bytes[6])))?;

        let mut checksum = [0u8; 8];
        checksum.copy_from_slice(&bytes[7..15]);
        let stored = u64::from_le_bytes(checksum);

        let body = bytes[IMAGE_HEADER_LEN..].to_vec();
        let actual = xxh3_64(&body);
        if stored != actual {
            return Err(Error::InvalidImage(format!(
                "checksum mismatch: header {stored:#018x}, body {actual:#018x}"
            )));
        }

        CodeImage::new(lineage, generation, body)
    }
}
