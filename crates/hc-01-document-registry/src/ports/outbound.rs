//! # Outbound Ports
//!
//! Traits for the external collaborators an upload and a verification go
//! through. Failures are reported as [`UpstreamError`] and passed through
//! unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, DocumentId, TimestampMillis, TxHash, UpstreamError};

use crate::domain::{ContentId, DocumentType};

/// Receipt of a successful `uploadDocument` contract call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Id assigned by the contract.
    pub document_id: DocumentId,
    /// Transaction hash.
    pub tx_hash: TxHash,
}

/// Document record as stored by the contract (`getDocument`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainDocument {
    /// CID of the pinned content.
    pub ipfs_cid: ContentId,
    /// Document type wire value.
    pub document_type: String,
    /// Registration time.
    pub timestamp: TimestampMillis,
    /// Owning wallet.
    pub owner: Address,
    /// Registered fingerprint.
    pub encryption_hash: String,
    /// False once the owner deactivated the document.
    pub is_active: bool,
}

/// Content-addressed store for document bytes - outbound port.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store (pin) the bytes and return their content identifier.
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, UpstreamError>;
}

/// Document side of the sharing contract - outbound port.
///
/// Calls are signed by whichever wallet is currently connected.
#[async_trait]
pub trait DocumentContract: Send + Sync {
    /// Register a document fingerprint.
    async fn upload_document(
        &self,
        cid: &str,
        document_type: DocumentType,
        encryption_hash: &str,
    ) -> Result<UploadReceipt, UpstreamError>;

    /// Attest a document as verified by the signing wallet.
    async fn verify_document(&self, document_id: DocumentId) -> Result<TxHash, UpstreamError>;

    /// Ids of documents owned by `owner`.
    async fn get_user_documents(&self, owner: Address) -> Result<Vec<DocumentId>, UpstreamError>;

    /// Read a document record.
    async fn get_document(&self, document_id: DocumentId) -> Result<OnChainDocument, UpstreamError>;
}
