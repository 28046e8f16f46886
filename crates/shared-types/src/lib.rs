//! # Shared Types Crate
//!
//! Identifiers and error types used across the HealthChain crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every crate names wallets, documents and
//!   transactions with the types defined here.
//! - **Opaque Upstream Failures**: failures of external collaborators (wallet,
//!   contract, content store, proof generator) travel as [`UpstreamError`]
//!   and are never interpreted or retried by the core.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
