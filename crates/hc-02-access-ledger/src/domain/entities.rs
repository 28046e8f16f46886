//! # Domain Entities
//!
//! Ledger entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shared_types::{Address, DocumentId, TimestampMillis, TxHash};
use uuid::Uuid;

/// One batched access grant. Immutable once recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Ledger entry id.
    pub id: Uuid,
    /// When the grant was recorded (unix millis).
    pub timestamp: TimestampMillis,
    /// Granting wallet.
    pub owner: Address,
    /// Shared documents, never empty.
    pub document_ids: BTreeSet<DocumentId>,
    /// Receiving facilities, never empty.
    pub facility_addresses: BTreeSet<Address>,
    /// Hash of the `batchGrantAccess` transaction.
    pub transaction_hash: TxHash,
}

impl AccessGrant {
    /// Check if this grant covers `document_id`.
    pub fn covers_document(&self, document_id: DocumentId) -> bool {
        self.document_ids.contains(&document_id)
    }

    /// Check if `facility` received this grant.
    pub fn includes_facility(&self, facility: &Address) -> bool {
        self.facility_addresses.contains(facility)
    }
}
