//! Foundational value types: token amounts and account identities
//!
//! Both types are plain data with validation at the construction
//! boundary. Once a value exists it is assumed well-formed everywhere
//! else in the system.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw units per whole native token (10^24, yocto-style scaling)
pub const UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000_000_000;

/// Raw units per one thousandth of a token
pub const UNITS_PER_MILLI: u128 = UNITS_PER_TOKEN / 1_000;

/// A native-denomination token amount
///
/// Stored and compared as raw `u128` units. `Amount::default()` is
/// zero, which doubles as the neutral value that upward schema
/// coercion assigns to records written before the `payment` field
/// existed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// Zero amount
    pub const fn zero() -> Self {
        Amount(0)
    }

    /// Construct from raw units
    pub const fn from_raw(raw: u128) -> Self {
        Amount(raw)
    }

    /// Construct from thousandths of a token (0.1 token = `from_milli(100)`)
    ///
    /// Saturates at `u128::MAX` rather than overflowing.
    pub const fn from_milli(milli: u128) -> Self {
        Amount(milli.saturating_mul(UNITS_PER_MILLI))
    }

    /// Construct from whole tokens
    ///
    /// Saturates at `u128::MAX` rather than overflowing.
    pub const fn from_tokens(tokens: u128) -> Self {
        Amount(tokens.saturating_mul(UNITS_PER_TOKEN))
    }

    /// Raw units
    pub const fn as_raw(&self) -> u128 {
        self.0
    }

    /// Whether this is the zero amount
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Saturating addition
    pub const fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}

/// Maximum byte length of an account identity
pub const MAX_ACCOUNT_BYTES: usize = 64;

/// A validated account identity
///
/// Rules (checked once, at construction):
/// - non-empty, at most [`MAX_ACCOUNT_BYTES`] bytes
/// - lowercase ASCII alphanumeric plus `-`, `_` and `.`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validate and construct an account identity
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidAccount("account id is empty".to_string()));
        }
        if id.len() > MAX_ACCOUNT_BYTES {
            return Err(Error::InvalidAccount(format!(
                "account id is {} bytes, max {}",
                id.len(),
                MAX_ACCOUNT_BYTES
            )));
        }
        if !id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'_' | b'.'))
        {
            return Err(Error::InvalidAccount(format!(
                "account id '{id}' contains characters outside [a-z0-9-_.]"
            )));
        }
        Ok(AccountId(id))
    }

    /// The identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identity as raw bytes (used for the manager slot)
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl TryFrom<String> for AccountId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        AccountId::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> String {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
