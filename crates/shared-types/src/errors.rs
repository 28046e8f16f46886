//! # Error Types
//!
//! Errors shared across crates.

use std::fmt;
use thiserror::Error;

/// Errors from parsing a wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Address does not start with `0x`.
    #[error("Address must start with 0x: {0}")]
    MissingPrefix(String),

    /// Wrong number of hex digits.
    #[error("Address has {got} hex digits, expected {expected}")]
    InvalidLength { got: usize, expected: usize },

    /// Non-hex characters.
    #[error("Address is not valid hex: {0}")]
    InvalidHex(String),
}

/// External collaborators whose failures are passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalService {
    /// Browser wallet / signer.
    Wallet,
    /// Document-sharing smart contract.
    Contract,
    /// Content-addressed file store (IPFS pinning).
    ContentStore,
    /// Zero-knowledge proof backend.
    ProofGenerator,
}

impl fmt::Display for ExternalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExternalService::Wallet => "wallet",
            ExternalService::Contract => "contract",
            ExternalService::ContentStore => "content store",
            ExternalService::ProofGenerator => "proof generator",
        };
        f.write_str(name)
    }
}

/// A failure reported by an external collaborator.
///
/// The message is carried verbatim. The core never retries; callers decide
/// whether to prompt the user again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} call failed: {message}")]
pub struct UpstreamError {
    /// Which collaborator failed.
    pub service: ExternalService,
    /// Message as reported by the collaborator.
    pub message: String,
}

impl UpstreamError {
    /// Create a new upstream error.
    pub fn new(service: ExternalService, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }

    /// Wallet failure.
    pub fn wallet(message: impl Into<String>) -> Self {
        Self::new(ExternalService::Wallet, message)
    }

    /// Contract failure.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::new(ExternalService::Contract, message)
    }

    /// Content store failure.
    pub fn content_store(message: impl Into<String>) -> Self {
        Self::new(ExternalService::ContentStore, message)
    }

    /// Proof generator failure.
    pub fn proof_generator(message: impl Into<String>) -> Self {
        Self::new(ExternalService::ProofGenerator, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_passes_message_through() {
        let err = UpstreamError::contract("execution reverted: not owner");
        assert_eq!(err.service, ExternalService::Contract);
        assert_eq!(
            err.to_string(),
            "contract call failed: execution reverted: not owner"
        );
    }

    #[test]
    fn test_address_error_display() {
        let err = AddressError::InvalidLength { got: 4, expected: 40 };
        assert!(err.to_string().contains("4 hex digits"));
    }
}
