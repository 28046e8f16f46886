//! # HC-02 Access Grant Ledger
//!
//! Append-only record of batched access grants to healthcare facilities.
//!
//! **Subsystem ID:** 02  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Record the outcome of `batchGrantAccess` calls for display and audit:
//! - A grant covers a non-empty set of documents and a non-empty set of facilities
//! - Every document in a grant is owned by the granting wallet and verified
//! - Entries are immutable; history is newest first
//! - A successful grant clears the registry's share selection
//!
//! ## Module Structure
//!
//! ```text
//! hc-02-access-ledger/
//! ├── domain/          # AccessGrant, Facility, FacilityDirectory, errors
//! ├── ports/           # AccessLedgerApi (inbound), DocumentAuthority + AccessContract (outbound)
//! ├── adapters/        # DocumentAuthority backed by the HC-01 registry
//! └── service.rs       # AccessGrantLedger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    invariant_non_empty_documents, invariant_non_empty_recipients, AccessGrant, Facility,
    FacilityCategory, FacilityDirectory, LedgerError,
};
pub use ports::{AccessContract, AccessLedgerApi, DocumentAuthority, GrantHistory};
pub use service::{validate_grant, AccessGrantLedger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
