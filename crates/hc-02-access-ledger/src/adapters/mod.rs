//! # Adapters
//!
//! Implementations of the ledger's outbound ports.

pub mod registry_authority;
