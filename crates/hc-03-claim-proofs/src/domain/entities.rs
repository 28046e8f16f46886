//! # Domain Entities
//!
//! A generated claim proof.

use serde::{Deserialize, Serialize};
use shared_types::{Address, DocumentId, TimestampMillis};

use super::value_objects::ClaimType;

/// Values a verifier sees without learning the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicInputs {
    /// `0x`-prefixed SHA-256 commitment to the hidden witness.
    pub commitment_hash: String,
    /// Threshold for range claims.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
}

/// A proof that `owner` satisfies `claim_type` for `document_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkProof {
    /// Proof identifier, `zk-` followed by nine base-36 characters.
    pub proof_id: String,
    /// Document the claim is about.
    pub document_id: DocumentId,
    /// Document owner who requested the proof.
    pub owner: Address,
    /// The proven claim.
    pub claim_type: ClaimType,
    /// Generation time.
    pub timestamp: TimestampMillis,
    /// Public inputs.
    pub public_inputs: PublicInputs,
    /// Serialized proof object.
    pub proof_string: String,
    /// Whether the generator accepted the witness.
    pub is_valid: bool,
}

impl ZkProof {
    /// Claim label for display.
    pub fn label(&self) -> &'static str {
        self.claim_type.label()
    }
}
