//! Simulated Proof Generator
//!
//! Produces groth16-shaped proofs whose public commitment is a SHA-256 over
//! the document, owner, claim and a random nonce. Verification accepts only
//! proofs this generator issued with an unchanged commitment.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use serde_json::json;
use sha2::{Digest, Sha256};
use shared_types::{current_timestamp_millis, Address, DocumentId};
use tracing::{debug, info};

use crate::domain::{ClaimType, ProofError, PublicInputs, ZkProof};
use crate::ports::ProofGenerator;

const PROOF_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const PROOF_ID_LEN: usize = 9;

/// In-process stand-in for a real prover.
#[derive(Debug, Default)]
pub struct SimulatedProofGenerator {
    latency: Duration,
    /// proof_id -> commitment of every proof issued.
    issued: Mutex<HashMap<String, String>>,
}

impl SimulatedProofGenerator {
    /// Generator that waits `latency` per proof and per verification.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Generator without artificial latency.
    pub fn instant() -> Self {
        Self::default()
    }

    /// Number of proofs issued so far.
    pub fn issued_count(&self) -> usize {
        self.issued.lock().len()
    }

    async fn simulate_work(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn build_proof(
        document_id: DocumentId,
        owner: Address,
        claim_type: ClaimType,
    ) -> Result<ZkProof, ProofError> {
        let mut rng = rand::thread_rng();
        let nonce: [u8; 32] = rng.gen();

        let mut hasher = Sha256::new();
        hasher.update(document_id.to_be_bytes());
        hasher.update(owner.as_bytes());
        hasher.update(claim_type.as_str().as_bytes());
        hasher.update(nonce);
        let commitment_hash = format!("0x{}", hex::encode(hasher.finalize()));

        let proof_id: String = (0..PROOF_ID_LEN)
            .map(|_| PROOF_ID_ALPHABET[rng.gen_range(0..PROOF_ID_ALPHABET.len())] as char)
            .collect();

        let mut field = || format!("0x{}", hex::encode(rng.gen::<[u8; 32]>()));
        let proof_string = serde_json::to_string(&json!({
            "pi_a": [field(), field(), "1"],
            "pi_b": [[field(), field()], [field(), field()], ["1", "0"]],
            "pi_c": [field(), field(), "1"],
            "protocol": "groth16",
            "curve": "bn128",
        }))
        .map_err(|e| ProofError::Encoding(e.to_string()))?;

        Ok(ZkProof {
            proof_id: format!("zk-{proof_id}"),
            document_id,
            owner,
            claim_type,
            timestamp: current_timestamp_millis(),
            public_inputs: PublicInputs {
                commitment_hash,
                threshold: claim_type.threshold(),
            },
            proof_string,
            is_valid: true,
        })
    }
}

fn is_groth16(proof_string: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(proof_string)
        .map(|v| v["protocol"] == "groth16" && v["curve"] == "bn128")
        .unwrap_or(false)
}

#[async_trait]
impl ProofGenerator for SimulatedProofGenerator {
    async fn generate(
        &self,
        document_id: DocumentId,
        owner: Address,
        claim_type: ClaimType,
    ) -> Result<ZkProof, ProofError> {
        debug!(document_id, claim = %claim_type, "[hc-03] Generating witness");
        self.simulate_work().await;

        let proof = Self::build_proof(document_id, owner, claim_type)?;
        self.issued.lock().insert(
            proof.proof_id.clone(),
            proof.public_inputs.commitment_hash.clone(),
        );

        info!(
            proof_id = %proof.proof_id,
            document_id,
            claim = %claim_type,
            "[hc-03] Proof generated"
        );
        Ok(proof)
    }

    async fn verify(&self, proof: &ZkProof) -> Result<bool, ProofError> {
        self.simulate_work().await;

        let known = self
            .issued
            .lock()
            .get(&proof.proof_id)
            .is_some_and(|c| *c == proof.public_inputs.commitment_hash);
        let valid = known && proof.is_valid && is_groth16(&proof.proof_string);

        debug!(proof_id = %proof.proof_id, valid, "[hc-03] Proof checked");
        Ok(valid)
    }
}
