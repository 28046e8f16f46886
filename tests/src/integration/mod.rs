//! Integration flows across the registry, ledger, proofs and session.

pub mod choreography;
pub mod concurrency;
pub mod flows;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use hc_01_document_registry::DocumentType;
    use hc_runtime::{SimulatedBackend, VaultConfig, VaultSession};
    use shared_types::{Address, DocumentId};

    pub const PATIENT: Address = Address::new([0xAA; 20]);
    pub const DOCTOR: Address = Address::new([0xBB; 20]);
    pub const NURSE: Address = Address::new([0xCC; 20]);

    pub fn vault() -> (Arc<VaultSession>, SimulatedBackend) {
        vault_with(VaultConfig::for_testing())
    }

    pub fn vault_with(config: VaultConfig) -> (Arc<VaultSession>, SimulatedBackend) {
        let backend = SimulatedBackend::new(&config, vec![PATIENT, DOCTOR, NURSE]);
        let session = VaultSession::new(config, backend.ports()).expect("builtin facilities");
        (Arc::new(session), backend)
    }

    /// Upload as the patient. Leaves the patient active.
    pub async fn upload(
        session: &VaultSession,
        backend: &SimulatedBackend,
        bytes: &[u8],
    ) -> DocumentId {
        backend.chain.switch_to(Some(PATIENT));
        session
            .upload_document(bytes, DocumentType::MedicalRecord)
            .await
            .expect("upload")
            .id
    }

    /// Verify as `verifier`, then hand the wallet back to the patient.
    pub async fn verify_as(
        session: &VaultSession,
        backend: &SimulatedBackend,
        verifier: Address,
        document_id: DocumentId,
    ) {
        backend.chain.switch_to(Some(verifier));
        session.verify_document(document_id).await.expect("verify");
        backend.chain.switch_to(Some(PATIENT));
    }
}
