//! # Domain Errors
//!
//! Error types for the Access Grant Ledger.

use hc_01_document_registry::RegistryError;
use shared_types::DocumentId;
use thiserror::Error;

/// Access ledger error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Grant attempted with no documents.
    #[error("No documents selected for the grant")]
    EmptySelection,

    /// Grant attempted with no facilities.
    #[error("No facilities selected for the grant")]
    EmptyRecipients,

    /// A document is not owned by the granting wallet, or is unverified.
    #[error("Document #{document_id} cannot be granted: {reason}")]
    Ownership {
        /// Offending document
        document_id: DocumentId,
        /// Registry check that failed
        reason: RegistryError,
    },

    /// Facility id not present in the directory.
    #[error("Unknown facility: {0}")]
    UnknownFacility(String),

    /// Built-in facility entry could not be parsed.
    #[error("Invalid facility entry {id}: {reason}")]
    InvalidFacility {
        /// Facility id
        id: String,
        /// Parse failure
        reason: String,
    },
}
