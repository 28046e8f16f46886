//! # Document Registry Service
//!
//! Session-scoped store of documents and the share selection.

use std::collections::{BTreeSet, HashMap};

use shared_types::{Address, DocumentId};
use tracing::{debug, info};

use crate::domain::{
    invariant_actor_is_owner, invariant_document_verified, invariant_valid_actor, Document,
    NewDocument, RegistryError, VerificationOutcome,
};
use crate::ports::DocumentRegistryApi;

/// Document Registry - owns every document known to the session.
///
/// Documents are never removed. Iteration follows upload order.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    /// Documents in upload order.
    documents: Vec<Document>,
    /// Position of each document in `documents`.
    index: HashMap<DocumentId, usize>,
    /// Documents selected for the next grant.
    selection: BTreeSet<DocumentId>,
}

impl DocumentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All documents in upload order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Documents owned by `owner`, in upload order.
    pub fn owned_by<'a>(&'a self, owner: &'a Address) -> impl Iterator<Item = &'a Document> {
        self.documents.iter().filter(move |d| d.is_owned_by(owner))
    }

    /// Look up a document by its content identifier.
    pub fn find_by_content_id(&self, content_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.content_id == content_id)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no document has been registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Check if `document_id` is currently selected.
    pub fn is_selected(&self, document_id: DocumentId) -> bool {
        self.selection.contains(&document_id)
    }

    fn lookup(&self, document_id: DocumentId) -> Result<&Document, RegistryError> {
        self.index
            .get(&document_id)
            .map(|&i| &self.documents[i])
            .ok_or(RegistryError::UnknownDocument(document_id))
    }

    fn lookup_mut(&mut self, document_id: DocumentId) -> Result<&mut Document, RegistryError> {
        match self.index.get(&document_id) {
            Some(&i) => Ok(&mut self.documents[i]),
            None => Err(RegistryError::UnknownDocument(document_id)),
        }
    }
}

impl DocumentRegistryApi for DocumentRegistry {
    fn register_upload(&mut self, new: NewDocument) -> Result<&Document, RegistryError> {
        invariant_valid_actor(&new.owner, "own a document")?;
        if self.index.contains_key(&new.id) {
            return Err(RegistryError::DuplicateDocument(new.id));
        }

        let position = self.documents.len();
        self.index.insert(new.id, position);
        self.documents.push(Document::new(new));

        let doc = &self.documents[position];
        info!(
            document_id = doc.id,
            owner = %doc.owner,
            document_type = %doc.document_type,
            "[hc-01] Document registered"
        );
        Ok(doc)
    }

    fn mark_verified(
        &mut self,
        document_id: DocumentId,
        verifier: Address,
    ) -> Result<VerificationOutcome, RegistryError> {
        invariant_valid_actor(&verifier, "verify a document")?;
        let doc = self.lookup_mut(document_id)?;

        if doc.is_owned_by(&verifier) {
            return Err(RegistryError::SelfVerification {
                document_id,
                verifier,
            });
        }

        if let Some(existing) = doc.verified_by.filter(|_| doc.is_verified()) {
            debug!(
                document_id,
                existing = %existing,
                requested = %verifier,
                "[hc-01] Document already verified, keeping first verifier"
            );
            return Ok(VerificationOutcome {
                verifier: existing,
                newly_verified: false,
            });
        }

        doc.verified_by = Some(verifier);
        info!(document_id, verifier = %verifier, "[hc-01] Document verified");
        Ok(VerificationOutcome {
            verifier,
            newly_verified: true,
        })
    }

    fn toggle_selection(
        &mut self,
        document_id: DocumentId,
        acting: Address,
    ) -> Result<bool, RegistryError> {
        self.ensure_shareable(document_id, &acting)?;

        let selected = if self.selection.remove(&document_id) {
            false
        } else {
            self.selection.insert(document_id);
            true
        };
        debug!(document_id, selected, "[hc-01] Selection toggled");
        Ok(selected)
    }

    fn current_selection(&self) -> BTreeSet<DocumentId> {
        self.selection.clone()
    }

    fn ensure_shareable(
        &self,
        document_id: DocumentId,
        acting: &Address,
    ) -> Result<&Document, RegistryError> {
        let doc = self.lookup(document_id)?;
        invariant_actor_is_owner(doc, acting)?;
        invariant_document_verified(doc)?;
        Ok(doc)
    }

    fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            debug!(cleared = self.selection.len(), "[hc-01] Selection cleared");
        }
        self.selection.clear();
    }

    fn get(&self, document_id: DocumentId) -> Option<&Document> {
        self.lookup(document_id).ok()
    }
}
