//! # Inbound Ports
//!
//! API trait defining what the Document Registry can do.

use std::collections::BTreeSet;

use shared_types::{Address, DocumentId};

use crate::domain::{Document, NewDocument, RegistryError, VerificationOutcome};

/// Document Registry API - inbound port.
///
/// All operations are synchronous local validation against session state.
pub trait DocumentRegistryApi {
    /// Record a document after the upstream upload succeeded.
    ///
    /// # Errors
    /// - `DuplicateDocument` if the id is already registered
    /// - `ZeroAddress` if the owner is the zero address
    fn register_upload(&mut self, new: NewDocument) -> Result<&Document, RegistryError>;

    /// Mark a document verified by `verifier`.
    ///
    /// Re-verifying an already verified document is a no-op that returns the
    /// existing verifier; a second verifier never overwrites the first.
    ///
    /// # Errors
    /// - `UnknownDocument`
    /// - `ZeroAddress` for the zero verifier
    /// - `SelfVerification` if `verifier` owns the document
    fn mark_verified(
        &mut self,
        document_id: DocumentId,
        verifier: Address,
    ) -> Result<VerificationOutcome, RegistryError>;

    /// Flip membership of a document in the current selection.
    ///
    /// Returns `true` if the document is selected afterwards.
    ///
    /// # Errors
    /// - `UnknownDocument`
    /// - `PermissionDenied` if `acting` is not the owner
    /// - `NotVerified` if the document is unverified
    fn toggle_selection(
        &mut self,
        document_id: DocumentId,
        acting: Address,
    ) -> Result<bool, RegistryError>;

    /// Snapshot of the selected document ids.
    fn current_selection(&self) -> BTreeSet<DocumentId>;

    /// Check that `acting` may share `document_id` (owned and verified).
    fn ensure_shareable(
        &self,
        document_id: DocumentId,
        acting: &Address,
    ) -> Result<&Document, RegistryError>;

    /// Empty the selection.
    fn clear_selection(&mut self);

    /// Look up a document.
    fn get(&self, document_id: DocumentId) -> Option<&Document>;
}
