//! # Core Identifiers
//!
//! Wallet addresses, document identifiers and transaction hashes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::AddressError;

/// Identifier assigned to a document by the contract on upload.
pub type DocumentId = u64;

/// Unix timestamp in milliseconds.
pub type TimestampMillis = u64;

/// A 20-byte EVM wallet address.
///
/// Parsing accepts any casing (EIP-55 checksum casing is ignored) and the
/// canonical textual form is lowercase `0x`-prefixed hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address, used on-chain as the "unset" sentinel.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Build an address from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Check for the zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Shortened form for display, e.g. `0x742d...beb0`.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| AddressError::MissingPrefix(s.to_string()))?;

        if digits.len() != 40 {
            return Err(AddressError::InvalidLength {
                got: digits.len(),
                expected: 40,
            });
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits.to_ascii_lowercase(), &mut bytes)
            .map_err(|_| AddressError::InvalidHex(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

/// Hash of a submitted contract transaction, as reported by the contract client.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Wrap a transaction hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TxHash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Returns the current Unix timestamp in milliseconds.
///
/// Returns 0 if the system clock is before `UNIX_EPOCH`.
pub fn current_timestamp_millis() -> TimestampMillis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
