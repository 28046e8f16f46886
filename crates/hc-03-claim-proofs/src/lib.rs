//! # HC-03 Claim Proofs
//!
//! Zero-knowledge claims about a registered document: prove a fact (age
//! threshold, valid prescription, active insurance) without revealing the
//! document itself.
//!
//! **Subsystem ID:** 03  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Define the claim catalogue and the proof record
//! - Put proof generation behind the `ProofGenerator` port so a real prover
//!   can replace the simulation without touching callers
//!
//! The bundled [`SimulatedProofGenerator`] produces groth16-shaped proofs
//! bound to a SHA-256 commitment; it performs no real proving.
//!
//! ## Module Structure
//!
//! ```text
//! hc-03-claim-proofs/
//! ├── domain/          # ClaimType, ZkProof, PublicInputs, errors
//! ├── ports/           # ProofGenerator (outbound)
//! └── adapters/        # SimulatedProofGenerator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::SimulatedProofGenerator;
pub use domain::{ClaimType, ProofError, PublicInputs, ZkProof};
pub use ports::ProofGenerator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
