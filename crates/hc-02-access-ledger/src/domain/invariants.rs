//! # Domain Invariants
//!
//! Business rules that must always hold true.

use std::collections::BTreeSet;

use shared_types::{Address, DocumentId};

use super::errors::LedgerError;

/// Invariant: a grant covers at least one document.
pub fn invariant_non_empty_documents(
    document_ids: &BTreeSet<DocumentId>,
) -> Result<(), LedgerError> {
    if document_ids.is_empty() {
        return Err(LedgerError::EmptySelection);
    }
    Ok(())
}

/// Invariant: a grant names at least one facility.
pub fn invariant_non_empty_recipients(facilities: &BTreeSet<Address>) -> Result<(), LedgerError> {
    if facilities.is_empty() {
        return Err(LedgerError::EmptyRecipients);
    }
    Ok(())
}
