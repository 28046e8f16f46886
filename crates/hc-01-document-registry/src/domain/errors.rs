//! # Domain Errors
//!
//! Error types for the Document Registry. All are local validation failures;
//! a failed operation leaves the registry unchanged.

use shared_types::{Address, DocumentId};
use thiserror::Error;

/// Document registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No document with this id in the session.
    #[error("Unknown document #{0}")]
    UnknownDocument(DocumentId),

    /// The contract returned an id that is already registered.
    #[error("Document #{0} is already registered")]
    DuplicateDocument(DocumentId),

    /// Acting wallet does not own the document.
    #[error("Permission denied: {acting} does not own document #{document_id}")]
    PermissionDenied {
        /// Target document
        document_id: DocumentId,
        /// Wallet that attempted the action
        acting: Address,
    },

    /// Sharing attempted on an unverified document.
    #[error("Document #{0} is not verified and cannot be shared")]
    NotVerified(DocumentId),

    /// The owner tried to verify their own document.
    #[error("Self-verification forbidden: {verifier} owns document #{document_id}")]
    SelfVerification {
        /// Target document
        document_id: DocumentId,
        /// Owner that attempted verification
        verifier: Address,
    },

    /// The zero address cannot act.
    #[error("Invalid actor: the zero address cannot {0}")]
    ZeroAddress(&'static str),

    /// Unrecognized document type string.
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),
}
