//! # HealthChain Demo
//!
//! Runs one full vault session against the simulated backend:
//!
//! 1. Patient connects and uploads a lab result
//! 2. Doctor switches in and verifies it
//! 3. Patient selects the document and grants it to two facilities
//! 4. Patient generates claim proofs about it
//!
//! Every bus event is logged as it arrives; the Prometheus text dump is
//! printed at the end.

use anyhow::{Context, Result};
use hc_01_document_registry::DocumentType;
use hc_03_claim_proofs::ClaimType;
use hc_runtime::{SimulatedBackend, VaultConfig, VaultSession};
use hc_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use shared_bus::EventFilter;
use shared_types::Address;
use tracing::{info, warn};

const PATIENT: Address = Address::new([
    0x9a, 0x1f, 0x4c, 0x2e, 0x07, 0xb3, 0x55, 0xd1, 0x6e, 0x80, 0x3a, 0xc4, 0x11, 0xf2, 0x7d, 0x68,
    0x25, 0xbe, 0x93, 0x0c,
]);
const DOCTOR: Address = Address::new([
    0x3d, 0xe8, 0x71, 0x0a, 0xc9, 0x46, 0x2b, 0x9f, 0x58, 0x13, 0xe7, 0x04, 0xa6, 0x6c, 0xd0, 0x35,
    0x8b, 0x22, 0xf9, 0x71,
]);

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialize telemetry")?;
    let config = VaultConfig::from_env().context("invalid vault configuration")?;

    info!(
        network = %config.network.name,
        chain_id = config.network.chain_id,
        contract = %config.network.address_url(&config.contract_address),
        "[hc-runtime] Starting HealthChain demo"
    );

    let backend = SimulatedBackend::new(&config, vec![PATIENT, DOCTOR]);
    let session =
        VaultSession::new(config, backend.ports()).context("failed to build vault session")?;

    let mut events = session.subscribe(EventFilter::all());
    let logger = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!(topic = ?event.topic(), ?event, "[bus] Event");
        }
    });

    // Patient uploads
    let patient = session.connect_wallet(false).await?;
    let balance = session.balance().await?;
    info!(account = %patient.short(), %balance, "[hc-runtime] Patient connected");

    let document = session
        .upload_document(b"CBC panel: all values within reference range", DocumentType::LabResult)
        .await
        .context("upload failed")?;
    info!(
        document_id = document.id,
        url = %session.config().content_url(&document.content_id),
        "[hc-runtime] Document uploaded"
    );

    // Owners cannot attest their own documents
    if let Err(e) = session.verify_document(document.id).await {
        warn!(error = %e, "[hc-runtime] Self-verification refused as expected");
    }

    // Doctor verifies
    let doctor = session.switch_wallet().await?;
    let outcome = session
        .verify_document(document.id)
        .await
        .context("verification failed")?;
    info!(
        doctor = %doctor.short(),
        verifier = %outcome.verifier.short(),
        "[hc-runtime] Document verified"
    );

    // Patient shares
    let patient = session.switch_wallet().await?;
    info!(account = %patient.short(), "[hc-runtime] Patient back");
    session.toggle_selection(document.id)?;
    let grant = session
        .grant_access(&["1", "3"])
        .await
        .context("access grant failed")?;
    info!(
        grant_id = %grant.id,
        facilities = grant.facility_addresses.len(),
        tx = %session.explorer_tx_url(&grant.transaction_hash),
        "[hc-runtime] Access granted"
    );

    // Patient proves claims
    let proofs = session
        .generate_proofs(document.id, &[ClaimType::AgeAbove18, ClaimType::IsInsured])
        .await
        .context("proof generation failed")?;
    for proof in &proofs {
        let valid = session.verify_proof(proof).await?;
        info!(
            proof_id = %proof.proof_id,
            claim = %proof.claim_type,
            valid,
            "[hc-runtime] Proof ready"
        );
    }

    logger.abort();

    println!("{}", encode_metrics()?);
    Ok(())
}
