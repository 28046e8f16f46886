//! # Outbound Ports
//!
//! Traits for the ledger's dependencies: the registry that decides whether
//! a document may be shared, and the contract that executes the grant.

use async_trait::async_trait;
use hc_01_document_registry::RegistryError;
use shared_types::{Address, DocumentId, TxHash, UpstreamError};

/// Source of truth for share eligibility - outbound port.
pub trait DocumentAuthority {
    /// Check that `acting` owns `document_id` and that it is verified.
    fn check_shareable(&self, document_id: DocumentId, acting: &Address)
        -> Result<(), RegistryError>;

    /// Clear the selection that drove a grant.
    fn clear_selection(&mut self);
}

/// Access side of the sharing contract - outbound port.
#[async_trait]
pub trait AccessContract: Send + Sync {
    /// Grant every facility access to every document in one transaction.
    async fn batch_grant_access(
        &self,
        document_ids: &[DocumentId],
        facilities: &[Address],
    ) -> Result<TxHash, UpstreamError>;

    /// Check whether `facility` currently holds unexpired access.
    async fn has_valid_access(
        &self,
        document_id: DocumentId,
        facility: Address,
    ) -> Result<bool, UpstreamError>;
}
