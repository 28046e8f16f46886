//! # Vault Session
//!
//! The single writer for one user session. The document registry and the
//! access ledger live behind one mutex that is never held across an await;
//! external calls go through the ports with no lock held and their results
//! are applied when they arrive.
//!
//! Every action publishes its outcome on the event bus: a success event,
//! `ActionRejected` for local rule violations, or `UpstreamFailed` when a
//! collaborator failed. Failed actions leave local state unchanged.

use std::collections::BTreeSet;
use std::sync::Arc;

use hc_01_document_registry::{
    content_fingerprint, invariant_actor_is_owner, ContentStore, Document, DocumentContract,
    DocumentRegistry, DocumentRegistryApi, DocumentType, NewDocument, RegistryError,
    VerificationOutcome,
};
use hc_02_access_ledger::{
    validate_grant, AccessContract, AccessGrant, AccessGrantLedger, AccessLedgerApi, Facility,
    FacilityDirectory,
};
use hc_03_claim_proofs::{ClaimType, ProofError, ProofGenerator, ZkProof};
use hc_telemetry::{
    metric_inc, HistogramTimer, ACCESS_GRANTS_RECORDED, ACTIONS_REJECTED, DOCUMENTS_REGISTERED,
    DOCUMENTS_VERIFIED, PROOFS_GENERATED, UPSTREAM_FAILURES,
};
use parking_lot::Mutex;
use shared_bus::{EventFilter, InMemoryEventBus, Subscription, VaultEvent};
use shared_types::{current_timestamp_millis, Address, DocumentId, TxHash};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::VaultConfig;
use crate::errors::{ActionKind, VaultError};
use crate::guard::InFlight;
use crate::ports::{Balance, WalletChange, WalletProvider};

/// Local state guarded by the session mutex.
#[derive(Debug, Default)]
pub struct VaultState {
    /// Documents, verification and selection.
    pub registry: DocumentRegistry,
    /// Access grants.
    pub ledger: AccessGrantLedger,
}

/// Outbound port handles.
#[derive(Clone)]
pub struct VaultPorts {
    /// Wallet provider.
    pub wallet: Arc<dyn WalletProvider>,
    /// Document side of the contract.
    pub documents: Arc<dyn DocumentContract>,
    /// Access side of the contract.
    pub access: Arc<dyn AccessContract>,
    /// Content store.
    pub content_store: Arc<dyn ContentStore>,
    /// Proof generator.
    pub prover: Arc<dyn ProofGenerator>,
}

/// One user's vault session.
pub struct VaultSession {
    config: VaultConfig,
    state: Mutex<VaultState>,
    facilities: FacilityDirectory,
    ports: VaultPorts,
    bus: Arc<InMemoryEventBus>,
    in_flight: InFlight,
}

impl VaultSession {
    /// Create a session with the built-in facility directory.
    pub fn new(config: VaultConfig, ports: VaultPorts) -> Result<Self, VaultError> {
        let facilities = FacilityDirectory::builtin()?;
        Ok(Self::with_facilities(config, ports, facilities))
    }

    /// Create a session with a custom facility directory.
    pub fn with_facilities(
        config: VaultConfig,
        ports: VaultPorts,
        facilities: FacilityDirectory,
    ) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_capacity));
        Self {
            config,
            state: Mutex::new(VaultState::default()),
            facilities,
            ports,
            bus,
            in_flight: InFlight::default(),
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Event bus carrying this session's outcomes.
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        self.bus.clone()
    }

    /// Subscribe to session events.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Check whether an action of `kind` is running.
    pub fn is_busy(&self, kind: ActionKind) -> bool {
        self.in_flight.is_busy(kind)
    }

    // =========================================================================
    // WALLET
    // =========================================================================

    /// Active wallet account.
    pub fn active_account(&self) -> Option<Address> {
        self.ports.wallet.account()
    }

    /// Connect the wallet. `force_select` opens the account picker.
    ///
    /// The selection is cleared when the connected account differs from the
    /// previous one.
    pub async fn connect_wallet(&self, force_select: bool) -> Result<Address, VaultError> {
        let result = self.connect_inner(force_select).await;
        self.settle(ActionKind::Connect, result)
    }

    /// Pick a different account. Always clears the selection.
    pub async fn switch_wallet(&self) -> Result<Address, VaultError> {
        let account = self.connect_wallet(true).await?;
        self.clear_selection();
        Ok(account)
    }

    /// Disconnect the wallet. Documents stay so another wallet can verify
    /// them; the selection is cleared.
    pub async fn disconnect_wallet(&self) -> Result<(), VaultError> {
        if let Err(e) = self.ports.wallet.disconnect().await {
            return self.settle(ActionKind::Connect, Err(e.into()));
        }
        self.clear_selection();
        info!("[hc-runtime] Wallet disconnected");
        self.bus.publish(VaultEvent::WalletChanged {
            account: None,
            chain_id: self.ports.wallet.chain_id(),
        });
        Ok(())
    }

    /// Native balance of the active account.
    pub async fn balance(&self) -> Result<Balance, VaultError> {
        let account = self.acting()?;
        Ok(self.ports.wallet.balance(account).await?)
    }

    /// React to a wallet notification.
    pub fn apply_wallet_change(&self, change: WalletChange) {
        match change {
            WalletChange::AccountChanged(account) => {
                self.clear_selection();
                info!(
                    account = ?account.map(|a| a.short()),
                    "[hc-runtime] Account changed"
                );
                self.bus.publish(VaultEvent::WalletChanged {
                    account,
                    chain_id: self.ports.wallet.chain_id(),
                });
            }
            WalletChange::NetworkChanged(chain_id) => {
                if chain_id != self.config.network.chain_id {
                    warn!(
                        chain_id,
                        expected = self.config.network.chain_id,
                        network = %self.config.network.name,
                        "[hc-runtime] Wallet is on an unexpected network"
                    );
                }
                self.bus.publish(VaultEvent::WalletChanged {
                    account: self.ports.wallet.account(),
                    chain_id: Some(chain_id),
                });
            }
        }
    }

    /// Forward wallet notifications to [`apply_wallet_change`](Self::apply_wallet_change)
    /// until the wallet closes its channel.
    pub fn spawn_wallet_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let session = Arc::clone(self);
        let mut changes = self.ports.wallet.changes();
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => session.apply_wallet_change(change),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "[hc-runtime] Wallet listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    /// Pin, fingerprint, register on-chain, then record the document.
    pub async fn upload_document(
        &self,
        bytes: &[u8],
        document_type: DocumentType,
    ) -> Result<Document, VaultError> {
        let result = self.upload_inner(bytes, document_type).await;
        self.settle(ActionKind::Upload, result)
    }

    /// Verify a document as the active wallet.
    ///
    /// Self-verification is refused before any contract call, and an already
    /// verified document returns its existing verifier without one.
    pub async fn verify_document(
        &self,
        document_id: DocumentId,
    ) -> Result<VerificationOutcome, VaultError> {
        let result = self.verify_inner(document_id).await;
        self.settle(ActionKind::Verify, result)
    }

    /// All documents in upload order.
    pub fn documents(&self) -> Vec<Document> {
        self.state.lock().registry.documents().cloned().collect()
    }

    /// Documents owned by the active wallet.
    pub fn my_documents(&self) -> Vec<Document> {
        let Some(account) = self.active_account() else {
            return Vec::new();
        };
        self.state
            .lock()
            .registry
            .owned_by(&account)
            .cloned()
            .collect()
    }

    /// Look up one document.
    pub fn document(&self, document_id: DocumentId) -> Option<Document> {
        self.state.lock().registry.get(document_id).cloned()
    }

    // =========================================================================
    // SHARING
    // =========================================================================

    /// Flip a document in or out of the share selection.
    pub fn toggle_selection(&self, document_id: DocumentId) -> Result<bool, VaultError> {
        let result = self.toggle_inner(document_id);
        match result {
            Ok(selected) => Ok(selected),
            Err(e) => self.reject("toggle_selection", e),
        }
    }

    /// Snapshot of the share selection.
    pub fn current_selection(&self) -> BTreeSet<DocumentId> {
        self.state.lock().registry.current_selection()
    }

    /// Grant the selected documents to the given facilities in one
    /// transaction.
    pub async fn grant_access<S: AsRef<str>>(
        &self,
        facility_ids: &[S],
    ) -> Result<AccessGrant, VaultError> {
        let result = self.grant_inner(facility_ids).await;
        self.settle(ActionKind::Grant, result)
    }

    /// Grant history, newest first.
    pub fn history(&self) -> Vec<AccessGrant> {
        self.state.lock().ledger.history().cloned().collect()
    }

    /// Facility directory, optionally filtered by name or category.
    pub fn facilities(&self, query: Option<&str>) -> Vec<Facility> {
        match query {
            Some(q) => self.facilities.search(q).into_iter().cloned().collect(),
            None => self.facilities.all().to_vec(),
        }
    }

    /// Ask the contract whether `facility` currently holds access.
    pub async fn check_access(
        &self,
        document_id: DocumentId,
        facility: Address,
    ) -> Result<bool, VaultError> {
        Ok(self.ports.access.has_valid_access(document_id, facility).await?)
    }

    /// Explorer link for a transaction.
    pub fn explorer_tx_url(&self, tx_hash: &TxHash) -> String {
        self.config.network.tx_url(tx_hash)
    }

    // =========================================================================
    // CLAIM PROOFS
    // =========================================================================

    /// Generate one proof per claim about a document the wallet owns.
    pub async fn generate_proofs(
        &self,
        document_id: DocumentId,
        claims: &[ClaimType],
    ) -> Result<Vec<ZkProof>, VaultError> {
        let result = self.proofs_inner(document_id, claims).await;
        self.settle(ActionKind::Proofs, result)
    }

    /// Check a proof with the proof generator.
    pub async fn verify_proof(&self, proof: &ZkProof) -> Result<bool, VaultError> {
        Ok(self.ports.prover.verify(proof).await?)
    }

    // =========================================================================
    // ACTION BODIES
    // =========================================================================

    async fn connect_inner(&self, force_select: bool) -> Result<Address, VaultError> {
        let _guard = self.in_flight.try_begin(ActionKind::Connect)?;
        let previous = self.ports.wallet.account();
        let account = self.ports.wallet.connect(force_select).await?;

        if previous != Some(account) {
            self.clear_selection();
        }
        info!(account = %account.short(), "[hc-runtime] Wallet connected");
        self.bus.publish(VaultEvent::WalletChanged {
            account: Some(account),
            chain_id: self.ports.wallet.chain_id(),
        });
        Ok(account)
    }

    async fn upload_inner(
        &self,
        bytes: &[u8],
        document_type: DocumentType,
    ) -> Result<Document, VaultError> {
        let _guard = self.in_flight.try_begin(ActionKind::Upload)?;
        let _timer = HistogramTimer::action(ActionKind::Upload.as_str());
        let owner = self.acting()?;
        if bytes.is_empty() {
            return Err(VaultError::EmptyFile);
        }

        let content_id = self.ports.content_store.put(bytes).await?;
        let encryption_hash = content_fingerprint(bytes);
        let receipt = self
            .ports
            .documents
            .upload_document(&content_id, document_type, &encryption_hash)
            .await?;

        let document = {
            let mut state = self.state.lock();
            state
                .registry
                .register_upload(NewDocument {
                    id: receipt.document_id,
                    content_id,
                    document_type,
                    owner,
                    encryption_hash,
                    created_at: current_timestamp_millis(),
                })?
                .clone()
        };

        metric_inc!(DOCUMENTS_REGISTERED);
        self.bus.publish(VaultEvent::DocumentUploaded {
            document_id: document.id,
            owner,
            document_type: document_type.as_str().to_string(),
            content_id: document.content_id.clone(),
            tx_hash: receipt.tx_hash,
        });
        Ok(document)
    }

    async fn verify_inner(
        &self,
        document_id: DocumentId,
    ) -> Result<VerificationOutcome, VaultError> {
        let _guard = self.in_flight.try_begin(ActionKind::Verify)?;
        let _timer = HistogramTimer::action(ActionKind::Verify.as_str());
        let verifier = self.acting()?;

        // Local checks before any contract call
        let existing = {
            let state = self.state.lock();
            let doc = state
                .registry
                .get(document_id)
                .ok_or(RegistryError::UnknownDocument(document_id))?;
            if doc.is_owned_by(&verifier) {
                return Err(RegistryError::SelfVerification {
                    document_id,
                    verifier,
                }
                .into());
            }
            doc.verified_by.filter(|_| doc.is_verified())
        };

        if let Some(first) = existing {
            debug!(
                document_id,
                verifier = %first,
                "[hc-runtime] Already verified, no contract call"
            );
            self.bus.publish(VaultEvent::DocumentVerified {
                document_id,
                verifier: first,
                on_chain: false,
                tx_hash: None,
            });
            return Ok(VerificationOutcome {
                verifier: first,
                newly_verified: false,
            });
        }

        let (tx_hash, path) = match self.ports.documents.verify_document(document_id).await {
            Ok(tx_hash) => (Some(tx_hash), "on_chain"),
            Err(e) if self.config.allow_local_verification_fallback => {
                warn!(
                    document_id,
                    error = %e,
                    "[hc-runtime] Contract verification failed, verifying locally"
                );
                (None, "local")
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = self.state.lock().registry.mark_verified(document_id, verifier)?;

        if outcome.newly_verified {
            metric_inc!(DOCUMENTS_VERIFIED, &[path]);
        }
        self.bus.publish(VaultEvent::DocumentVerified {
            document_id,
            verifier: outcome.verifier,
            on_chain: tx_hash.is_some(),
            tx_hash,
        });
        Ok(outcome)
    }

    fn toggle_inner(&self, document_id: DocumentId) -> Result<bool, VaultError> {
        let acting = self.acting()?;
        let (selected, selection_size) = {
            let mut state = self.state.lock();
            let selected = state.registry.toggle_selection(document_id, acting)?;
            (selected, state.registry.current_selection().len())
        };

        self.bus.publish(VaultEvent::SelectionChanged {
            document_id,
            selected,
            selection_size,
        });
        Ok(selected)
    }

    async fn grant_inner<S: AsRef<str>>(
        &self,
        facility_ids: &[S],
    ) -> Result<AccessGrant, VaultError> {
        let _guard = self.in_flight.try_begin(ActionKind::Grant)?;
        let _timer = HistogramTimer::action(ActionKind::Grant.as_str());
        let acting = self.acting()?;

        let facility_addresses: BTreeSet<Address> = self
            .facilities
            .resolve(facility_ids)?
            .into_iter()
            .map(|f| f.address)
            .collect();

        // Validate locally before the contract call
        let document_ids = {
            let state = self.state.lock();
            let selection = state.registry.current_selection();
            validate_grant(&state.registry, &selection, &facility_addresses, &acting)?;
            selection
        };

        let documents: Vec<DocumentId> = document_ids.iter().copied().collect();
        let recipients: Vec<Address> = facility_addresses.iter().copied().collect();
        let tx_hash = self
            .ports
            .access
            .batch_grant_access(&documents, &recipients)
            .await?;

        let grant = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            state
                .ledger
                .record_grant(
                    &mut state.registry,
                    &document_ids,
                    &facility_addresses,
                    tx_hash,
                    acting,
                )?
                .clone()
        };

        metric_inc!(ACCESS_GRANTS_RECORDED);
        self.bus.publish(VaultEvent::AccessGranted {
            grant_id: grant.id,
            owner: acting,
            document_ids: documents,
            facility_addresses: recipients,
            tx_hash: grant.transaction_hash.clone(),
        });
        Ok(grant)
    }

    async fn proofs_inner(
        &self,
        document_id: DocumentId,
        claims: &[ClaimType],
    ) -> Result<Vec<ZkProof>, VaultError> {
        let _guard = self.in_flight.try_begin(ActionKind::Proofs)?;
        let _timer = HistogramTimer::action(ActionKind::Proofs.as_str());
        let owner = self.acting()?;
        if claims.is_empty() {
            return Err(ProofError::NoClaims.into());
        }

        {
            let state = self.state.lock();
            let doc = state
                .registry
                .get(document_id)
                .ok_or(RegistryError::UnknownDocument(document_id))?;
            invariant_actor_is_owner(doc, &owner)?;
        }

        let mut proofs = Vec::with_capacity(claims.len());
        for &claim in claims {
            let proof = self.ports.prover.generate(document_id, owner, claim).await?;
            metric_inc!(PROOFS_GENERATED, &[claim.as_str()]);
            self.bus.publish(VaultEvent::ProofGenerated {
                proof_id: proof.proof_id.clone(),
                document_id,
                claim_type: claim.as_str().to_string(),
            });
            proofs.push(proof);
        }
        Ok(proofs)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn acting(&self) -> Result<Address, VaultError> {
        self.ports
            .wallet
            .account()
            .ok_or(VaultError::WalletNotConnected)
    }

    fn clear_selection(&self) {
        self.state.lock().registry.clear_selection();
    }

    /// Publish the failure of an action and hand the error back.
    fn settle<T>(
        &self,
        action: ActionKind,
        result: Result<T, VaultError>,
    ) -> Result<T, VaultError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => self.reject(action.as_str(), e),
        }
    }

    fn reject<T>(&self, action: &str, error: VaultError) -> Result<T, VaultError> {
        let event = match error.upstream() {
            Some(upstream) => {
                warn!(action, error = %upstream, "[hc-runtime] Upstream failure");
                let service = upstream.service.to_string();
                metric_inc!(UPSTREAM_FAILURES, &[service.as_str()]);
                VaultEvent::upstream_failed(action, upstream)
            }
            None => {
                warn!(action, error = %error, "[hc-runtime] Action rejected");
                metric_inc!(ACTIONS_REJECTED, &[action]);
                VaultEvent::rejected(action, &error)
            }
        };
        self.bus.publish(event);
        Err(error)
    }
}
