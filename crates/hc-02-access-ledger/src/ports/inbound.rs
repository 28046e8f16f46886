//! # Inbound Ports
//!
//! API trait defining what the Access Grant Ledger can do.

use std::collections::BTreeSet;

use shared_types::{Address, DocumentId, TxHash};

use super::outbound::DocumentAuthority;
use crate::domain::{AccessGrant, LedgerError};

/// Newest-first view over the ledger. Cloning restarts the iteration.
pub type GrantHistory<'a> = std::iter::Rev<std::slice::Iter<'a, AccessGrant>>;

/// Access Grant Ledger API - inbound port.
pub trait AccessLedgerApi {
    /// Record a successful batch grant.
    ///
    /// Validation runs completely before anything changes: on error the
    /// ledger and the selection are untouched. On success the entry is
    /// prepended and the authority's selection is cleared.
    ///
    /// # Errors
    /// - `EmptySelection` if `document_ids` is empty
    /// - `EmptyRecipients` if `facility_addresses` is empty
    /// - `Ownership` if a document is not owned by `acting` or unverified
    fn record_grant(
        &mut self,
        authority: &mut dyn DocumentAuthority,
        document_ids: &BTreeSet<DocumentId>,
        facility_addresses: &BTreeSet<Address>,
        transaction_hash: TxHash,
        acting: Address,
    ) -> Result<&AccessGrant, LedgerError>;

    /// Grants, newest first.
    fn history(&self) -> GrantHistory<'_>;
}
