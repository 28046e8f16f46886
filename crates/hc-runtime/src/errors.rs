//! # Session Errors

use std::fmt;

use hc_01_document_registry::RegistryError;
use hc_02_access_ledger::LedgerError;
use hc_03_claim_proofs::ProofError;
use shared_types::UpstreamError;
use thiserror::Error;

/// Kinds of session action that may each have one call in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Wallet connect or switch.
    Connect,
    /// Document upload.
    Upload,
    /// Document verification.
    Verify,
    /// Batched access grant.
    Grant,
    /// Claim proof generation.
    Proofs,
}

impl ActionKind {
    /// Every action kind.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Connect,
        ActionKind::Upload,
        ActionKind::Verify,
        ActionKind::Grant,
        ActionKind::Proofs,
    ];

    /// Action name used in events, logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Connect => "connect_wallet",
            ActionKind::Upload => "upload_document",
            ActionKind::Verify => "verify_document",
            ActionKind::Grant => "grant_access",
            ActionKind::Proofs => "generate_proofs",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vault session error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Document registry rule violated.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Access ledger rule violated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Claim proof request rejected or failed.
    #[error(transparent)]
    Proof(#[from] ProofError),

    /// External collaborator failed; passed through unchanged.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The action needs a connected wallet.
    #[error("No wallet connected")]
    WalletNotConnected,

    /// The same kind of action is still running.
    #[error("{0} is already in progress")]
    ActionInProgress(ActionKind),

    /// Upload attempted without file content.
    #[error("No file selected")]
    EmptyFile,
}

impl VaultError {
    /// The upstream failure behind this error, if any.
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            VaultError::Upstream(e) | VaultError::Proof(ProofError::Upstream(e)) => Some(e),
            _ => None,
        }
    }
}
