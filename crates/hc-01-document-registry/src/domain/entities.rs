//! # Domain Entities
//!
//! The registry's view of an uploaded document.

use serde::{Deserialize, Serialize};
use shared_types::{Address, DocumentId, TimestampMillis};

use super::value_objects::{ContentId, DocumentType, VerificationStatus};

/// Data needed to register a freshly uploaded document.
///
/// Built from the contract's upload receipt; `id` is assigned upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
    /// Id returned by the contract.
    pub id: DocumentId,
    /// CID returned by the content store.
    pub content_id: ContentId,
    /// Declared document type.
    pub document_type: DocumentType,
    /// Uploading wallet.
    pub owner: Address,
    /// Fingerprint registered on-chain.
    pub encryption_hash: String,
    /// Upload time.
    pub created_at: TimestampMillis,
}

/// A document registered in the current session.
///
/// `owner` is fixed at creation. `verified_by` changes at most once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Contract-assigned id.
    pub id: DocumentId,
    /// Content store identifier.
    pub content_id: ContentId,
    /// Document type.
    pub document_type: DocumentType,
    /// Uploading wallet.
    pub owner: Address,
    /// Verifier, `None` while unverified.
    pub verified_by: Option<Address>,
    /// On-chain fingerprint.
    pub encryption_hash: String,
    /// Upload time (unix millis).
    pub created_at: TimestampMillis,
}

impl Document {
    /// Create an unverified document.
    pub fn new(new: NewDocument) -> Self {
        Self {
            id: new.id,
            content_id: new.content_id,
            document_type: new.document_type,
            owner: new.owner,
            verified_by: None,
            encryption_hash: new.encryption_hash,
            created_at: new.created_at,
        }
    }

    /// A document is verified iff a non-zero verifier other than the owner is set.
    pub fn is_verified(&self) -> bool {
        self.verified_by
            .is_some_and(|v| !v.is_zero() && v != self.owner)
    }

    /// Current verification state.
    pub fn status(&self) -> VerificationStatus {
        match self.verified_by {
            Some(by) if self.is_verified() => VerificationStatus::Verified { by },
            _ => VerificationStatus::Unverified,
        }
    }

    /// Check if `address` owns this document.
    pub fn is_owned_by(&self, address: &Address) -> bool {
        self.owner == *address
    }
}
