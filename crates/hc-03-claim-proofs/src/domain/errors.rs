//! # Domain Errors

use shared_types::UpstreamError;
use thiserror::Error;

/// Claim proof error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// No claims requested.
    #[error("At least one claim must be selected")]
    NoClaims,

    /// Unrecognized claim string.
    #[error("Unknown claim type: {0}")]
    UnknownClaim(String),

    /// Proof string could not be encoded.
    #[error("Proof encoding failed: {0}")]
    Encoding(String),

    /// The proving backend failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
