//! # Adapters
//!
//! Simulated implementations of every outbound port, plus a bundle that
//! hands them to a session.

pub mod content_store;
pub mod simulated_chain;

use std::sync::Arc;

use hc_03_claim_proofs::SimulatedProofGenerator;
use shared_types::Address;

pub use content_store::SimulatedContentStore;
pub use simulated_chain::{CallCounts, SimulatedChain};

use crate::config::VaultConfig;
use crate::session::VaultPorts;

/// Simulated collaborators sharing one chain.
#[derive(Clone)]
pub struct SimulatedBackend {
    /// Wallet and contract.
    pub chain: Arc<SimulatedChain>,
    /// Content store.
    pub store: Arc<SimulatedContentStore>,
    /// Proof generator.
    pub prover: Arc<SimulatedProofGenerator>,
}

impl SimulatedBackend {
    /// Backend for `config.network` with the given wallet accounts.
    pub fn new(config: &VaultConfig, accounts: Vec<Address>) -> Self {
        Self {
            chain: Arc::new(SimulatedChain::new(config.network.chain_id, accounts)),
            store: Arc::new(SimulatedContentStore::new()),
            prover: Arc::new(SimulatedProofGenerator::new(config.proof_latency)),
        }
    }

    /// Port handles for a session.
    pub fn ports(&self) -> VaultPorts {
        VaultPorts {
            wallet: self.chain.clone(),
            documents: self.chain.clone(),
            access: self.chain.clone(),
            content_store: self.store.clone(),
            prover: self.prover.clone(),
        }
    }
}
