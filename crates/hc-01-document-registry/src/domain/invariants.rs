//! # Domain Invariants
//!
//! Business rules that must always hold true.

use shared_types::Address;

use super::entities::Document;
use super::errors::RegistryError;

/// Invariant: `verified_by` never equals `owner`.
pub fn invariant_not_self_verified(doc: &Document) -> bool {
    doc.verified_by != Some(doc.owner)
}

/// Invariant: the zero address never acts (owns, verifies, or shares).
pub fn invariant_valid_actor(actor: &Address, action: &'static str) -> Result<(), RegistryError> {
    if actor.is_zero() {
        return Err(RegistryError::ZeroAddress(action));
    }
    Ok(())
}

/// Invariant: only the owner may select or share a document.
pub fn invariant_actor_is_owner(doc: &Document, acting: &Address) -> Result<(), RegistryError> {
    if !doc.is_owned_by(acting) {
        return Err(RegistryError::PermissionDenied {
            document_id: doc.id,
            acting: *acting,
        });
    }
    Ok(())
}

/// Invariant: only verified documents may be selected or shared.
pub fn invariant_document_verified(doc: &Document) -> Result<(), RegistryError> {
    if !doc.is_verified() {
        return Err(RegistryError::NotVerified(doc.id));
    }
    Ok(())
}
