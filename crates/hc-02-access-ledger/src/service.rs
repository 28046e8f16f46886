//! # Access Grant Ledger Service
//!
//! Append-only, newest-first record of batched access grants.

use std::collections::BTreeSet;

use shared_types::{current_timestamp_millis, Address, DocumentId, TxHash};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    invariant_non_empty_documents, invariant_non_empty_recipients, AccessGrant, LedgerError,
};
use crate::ports::{AccessLedgerApi, DocumentAuthority, GrantHistory};

/// Check a grant request without recording it.
///
/// Applies the same rules as [`AccessLedgerApi::record_grant`]: at least one
/// document, at least one facility, and every document owned by `acting`
/// and verified. Lets callers reject a grant before the contract call.
pub fn validate_grant(
    authority: &dyn DocumentAuthority,
    document_ids: &BTreeSet<DocumentId>,
    facility_addresses: &BTreeSet<Address>,
    acting: &Address,
) -> Result<(), LedgerError> {
    invariant_non_empty_documents(document_ids)?;
    invariant_non_empty_recipients(facility_addresses)?;

    for &document_id in document_ids {
        if let Err(reason) = authority.check_shareable(document_id, acting) {
            warn!(
                document_id,
                acting = %acting,
                %reason,
                "[hc-02] Grant rejected"
            );
            return Err(LedgerError::Ownership {
                document_id,
                reason,
            });
        }
    }
    Ok(())
}

/// Access Grant Ledger.
///
/// Entries are stored oldest first and read back reversed, so recorded
/// grants never move and history never recomputes.
#[derive(Debug, Default)]
pub struct AccessGrantLedger {
    grants: Vec<AccessGrant>,
}

impl AccessGrantLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent grant.
    pub fn latest(&self) -> Option<&AccessGrant> {
        self.grants.last()
    }

    /// Grants covering `document_id`, newest first.
    pub fn grants_for_document(&self, document_id: DocumentId) -> Vec<&AccessGrant> {
        self.history()
            .filter(|g| g.covers_document(document_id))
            .collect()
    }

    /// Grants received by `facility`, newest first.
    pub fn grants_for_facility(&self, facility: &Address) -> Vec<&AccessGrant> {
        self.history()
            .filter(|g| g.includes_facility(facility))
            .collect()
    }

    /// Number of grants.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Check if nothing has been granted yet.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl AccessLedgerApi for AccessGrantLedger {
    fn record_grant(
        &mut self,
        authority: &mut dyn DocumentAuthority,
        document_ids: &BTreeSet<DocumentId>,
        facility_addresses: &BTreeSet<Address>,
        transaction_hash: TxHash,
        acting: Address,
    ) -> Result<&AccessGrant, LedgerError> {
        validate_grant(&*authority, document_ids, facility_addresses, &acting)?;

        let grant = AccessGrant {
            id: Uuid::new_v4(),
            timestamp: current_timestamp_millis(),
            owner: acting,
            document_ids: document_ids.clone(),
            facility_addresses: facility_addresses.clone(),
            transaction_hash,
        };
        info!(
            grant_id = %grant.id,
            documents = grant.document_ids.len(),
            facilities = grant.facility_addresses.len(),
            tx_hash = %grant.transaction_hash,
            "[hc-02] Access grant recorded"
        );

        self.grants.push(grant);
        authority.clear_selection();

        Ok(&self.grants[self.grants.len() - 1])
    }

    fn history(&self) -> GrantHistory<'_> {
        self.grants.iter().rev()
    }
}
