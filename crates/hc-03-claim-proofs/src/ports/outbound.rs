//! # Outbound Ports
//!
//! The proving backend.

use async_trait::async_trait;
use shared_types::{Address, DocumentId};

use crate::domain::{ClaimType, ProofError, ZkProof};

/// Proof generation and verification - outbound port.
///
/// Callers are responsible for checking document ownership before asking
/// for a proof.
#[async_trait]
pub trait ProofGenerator: Send + Sync {
    /// Generate a proof for `claim_type` about `document_id`.
    async fn generate(
        &self,
        document_id: DocumentId,
        owner: Address,
        claim_type: ClaimType,
    ) -> Result<ZkProof, ProofError>;

    /// Check a previously generated proof.
    async fn verify(&self, proof: &ZkProof) -> Result<bool, ProofError>;
}
