//! # HC-01 Document Registry
//!
//! In-memory model of the documents known to a session: ownership,
//! verification status, and the set of documents selected for sharing.
//!
//! **Subsystem ID:** 01  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Govern which actions a wallet may take on a document:
//! - Only the owner may select a document for sharing
//! - Only verified documents may be selected
//! - Nobody may verify their own document
//!
//! ## Verification State Machine
//!
//! ```text
//! Unverified ──mark_verified(non-owner)──→ Verified (terminal)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! hc-01-document-registry/
//! ├── domain/          # Document, DocumentType, invariants, errors
//! ├── ports/           # DocumentRegistryApi (inbound), ContentStore + DocumentContract (outbound)
//! └── service.rs       # DocumentRegistry
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    content_fingerprint, invariant_actor_is_owner, invariant_document_verified,
    invariant_not_self_verified, invariant_valid_actor, ContentId, Document, DocumentType,
    NewDocument, RegistryError, VerificationOutcome, VerificationStatus,
};
pub use ports::{
    ContentStore, DocumentContract, DocumentRegistryApi, OnChainDocument, UploadReceipt,
};
pub use service::DocumentRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
