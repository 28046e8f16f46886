//! # Simulated Chain Adapter
//!
//! An in-process stand-in for the browser wallet and the document-sharing
//! contract. Implements `WalletProvider`, `DocumentContract` and
//! `AccessContract` over one shared state so that contract calls are signed
//! by whichever account the wallet has active.
//!
//! Test hooks: `switch_to` emulates the user changing accounts in the
//! wallet, `fail_next` makes the next contract call revert, and
//! `set_latency` delays every contract call.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hc_01_document_registry::{DocumentContract, DocumentType, OnChainDocument, UploadReceipt};
use hc_02_access_ledger::AccessContract;
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use shared_types::{
    current_timestamp_millis, Address, DocumentId, TimestampMillis, TxHash, UpstreamError,
};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::ports::{Balance, WalletChange, WalletProvider};

/// How long a batch grant stays valid.
pub const ACCESS_DURATION_MS: TimestampMillis = 30 * 24 * 60 * 60 * 1000;

/// Starting balance of every simulated account (5 CELO).
pub const STARTING_BALANCE: u128 = 5_000_000_000_000_000_000;

#[derive(Debug, Default)]
struct ChainState {
    active: Option<Address>,
    cursor: usize,
    next_document_id: DocumentId,
    documents: BTreeMap<DocumentId, OnChainDocument>,
    verifiers: HashMap<DocumentId, Address>,
    /// (document, facility) -> expiry
    access: HashMap<(DocumentId, Address), TimestampMillis>,
    tx_count: u64,
}

/// Number of contract calls by kind.
#[derive(Debug, Default)]
pub struct CallCounts {
    /// `uploadDocument`
    pub upload: AtomicUsize,
    /// `verifyDocument`
    pub verify: AtomicUsize,
    /// `batchGrantAccess`
    pub grant: AtomicUsize,
}

/// Simulated wallet plus contract.
pub struct SimulatedChain {
    accounts: Vec<Address>,
    chain_id: u64,
    symbol: String,
    state: RwLock<ChainState>,
    fail_next: Mutex<Option<String>>,
    latency: Mutex<Duration>,
    changes: broadcast::Sender<WalletChange>,
    calls: CallCounts,
}

impl SimulatedChain {
    /// Chain with the given wallet accounts, none connected.
    pub fn new(chain_id: u64, accounts: Vec<Address>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            accounts,
            chain_id,
            symbol: "CELO".to_string(),
            state: RwLock::new(ChainState {
                next_document_id: 1,
                ..ChainState::default()
            }),
            fail_next: Mutex::new(None),
            latency: Mutex::new(Duration::ZERO),
            changes,
            calls: CallCounts::default(),
        }
    }

    /// Wallet accounts in picker order.
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Emulate the user switching accounts in the wallet.
    pub fn switch_to(&self, account: Option<Address>) {
        self.state.write().active = account;
        let _ = self.changes.send(WalletChange::AccountChanged(account));
    }

    /// Emulate the user switching networks in the wallet.
    pub fn switch_network(&self, chain_id: u64) {
        let _ = self.changes.send(WalletChange::NetworkChanged(chain_id));
    }

    /// Make the next contract call revert with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock() = Some(message.into());
    }

    /// Delay every contract call.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    /// Contract call counters.
    pub fn calls(&self) -> &CallCounts {
        &self.calls
    }

    /// Verifier recorded on-chain for a document.
    pub fn verifier_of(&self, document_id: DocumentId) -> Option<Address> {
        self.state.read().verifiers.get(&document_id).copied()
    }

    async fn begin_call(&self, method: &str) -> Result<Address, UpstreamError> {
        let latency = *self.latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = self.fail_next.lock().take() {
            debug!(method, %message, "[chain] Injected failure");
            return Err(UpstreamError::contract(message));
        }
        self.state
            .read()
            .active
            .ok_or_else(|| UpstreamError::wallet("no account connected"))
    }

    fn next_tx_hash(state: &mut ChainState, method: &str) -> TxHash {
        state.tx_count += 1;
        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        hasher.update(state.tx_count.to_be_bytes());
        TxHash::new(format!("0x{}", hex::encode(hasher.finalize())))
    }

    fn revert(reason: &str) -> UpstreamError {
        UpstreamError::contract(format!("execution reverted: {reason}"))
    }
}

#[async_trait]
impl WalletProvider for SimulatedChain {
    async fn connect(&self, force_select: bool) -> Result<Address, UpstreamError> {
        let mut state = self.state.write();
        if let (false, Some(active)) = (force_select, state.active) {
            return Ok(active);
        }
        if self.accounts.is_empty() {
            return Err(UpstreamError::wallet("no accounts available"));
        }
        let account = self.accounts[state.cursor % self.accounts.len()];
        state.cursor += 1;
        state.active = Some(account);
        drop(state);

        info!(account = %account.short(), "[chain] Account connected");
        let _ = self.changes.send(WalletChange::AccountChanged(Some(account)));
        Ok(account)
    }

    async fn disconnect(&self) -> Result<(), UpstreamError> {
        self.state.write().active = None;
        Ok(())
    }

    fn account(&self) -> Option<Address> {
        self.state.read().active
    }

    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }

    async fn balance(&self, account: Address) -> Result<Balance, UpstreamError> {
        if !self.accounts.contains(&account) {
            return Err(UpstreamError::wallet(format!("unknown account {account}")));
        }
        Ok(Balance {
            raw: STARTING_BALANCE,
            decimals: 18,
            symbol: self.symbol.clone(),
        })
    }

    fn changes(&self) -> broadcast::Receiver<WalletChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl DocumentContract for SimulatedChain {
    async fn upload_document(
        &self,
        cid: &str,
        document_type: DocumentType,
        encryption_hash: &str,
    ) -> Result<UploadReceipt, UpstreamError> {
        self.calls.upload.fetch_add(1, Ordering::Relaxed);
        let signer = self.begin_call("uploadDocument").await?;

        let mut state = self.state.write();
        let document_id = state.next_document_id;
        state.next_document_id += 1;
        state.documents.insert(
            document_id,
            OnChainDocument {
                ipfs_cid: cid.to_string(),
                document_type: document_type.as_str().to_string(),
                timestamp: current_timestamp_millis(),
                owner: signer,
                encryption_hash: encryption_hash.to_string(),
                is_active: true,
            },
        );
        let tx_hash = Self::next_tx_hash(&mut state, "uploadDocument");
        debug!(document_id, owner = %signer, tx_hash = %tx_hash, "[chain] DocumentUploaded");
        Ok(UploadReceipt {
            document_id,
            tx_hash,
        })
    }

    async fn verify_document(&self, document_id: DocumentId) -> Result<TxHash, UpstreamError> {
        self.calls.verify.fetch_add(1, Ordering::Relaxed);
        let signer = self.begin_call("verifyDocument").await?;

        let mut state = self.state.write();
        let owner = state
            .documents
            .get(&document_id)
            .map(|d| d.owner)
            .ok_or_else(|| Self::revert("document does not exist"))?;
        if owner == signer {
            return Err(Self::revert("owner cannot verify own document"));
        }
        state.verifiers.entry(document_id).or_insert(signer);
        let tx_hash = Self::next_tx_hash(&mut state, "verifyDocument");
        debug!(document_id, verifier = %signer, tx_hash = %tx_hash, "[chain] DocumentVerified");
        Ok(tx_hash)
    }

    async fn get_user_documents(&self, owner: Address) -> Result<Vec<DocumentId>, UpstreamError> {
        Ok(self
            .state
            .read()
            .documents
            .iter()
            .filter(|(_, d)| d.owner == owner)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn get_document(
        &self,
        document_id: DocumentId,
    ) -> Result<OnChainDocument, UpstreamError> {
        self.state
            .read()
            .documents
            .get(&document_id)
            .cloned()
            .ok_or_else(|| Self::revert("document does not exist"))
    }
}

#[async_trait]
impl AccessContract for SimulatedChain {
    async fn batch_grant_access(
        &self,
        document_ids: &[DocumentId],
        facilities: &[Address],
    ) -> Result<TxHash, UpstreamError> {
        self.calls.grant.fetch_add(1, Ordering::Relaxed);
        let signer = self.begin_call("batchGrantAccess").await?;

        let mut state = self.state.write();
        for id in document_ids {
            match state.documents.get(id) {
                Some(doc) if doc.owner == signer => {}
                Some(_) => return Err(Self::revert("not document owner")),
                None => return Err(Self::revert("document does not exist")),
            }
        }

        let expires_at = current_timestamp_millis() + ACCESS_DURATION_MS;
        for &id in document_ids {
            for &facility in facilities {
                state.access.insert((id, facility), expires_at);
            }
        }
        let tx_hash = Self::next_tx_hash(&mut state, "batchGrantAccess");
        debug!(
            documents = ?document_ids,
            facilities = ?facilities.iter().map(Address::to_string).collect::<Vec<_>>(),
            tx_hash = %tx_hash,
            "[chain] BatchAccessGranted"
        );
        Ok(tx_hash)
    }

    async fn has_valid_access(
        &self,
        document_id: DocumentId,
        facility: Address,
    ) -> Result<bool, UpstreamError> {
        let state = self.state.read();
        if !state.documents.contains_key(&document_id) {
            return Err(Self::revert("document does not exist"));
        }
        Ok(state
            .access
            .get(&(document_id, facility))
            .is_some_and(|expiry| *expiry > current_timestamp_millis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENT: Address = Address::new([0xAA; 20]);
    const DOCTOR: Address = Address::new([0xBB; 20]);
    const HOSPITAL: Address = Address::new([0x74; 20]);

    fn chain() -> SimulatedChain {
        SimulatedChain::new(11_142_220, vec![PATIENT, DOCTOR])
    }

    #[tokio::test]
    async fn test_connect_and_force_select() {
        let chain = chain();
        assert_eq!(chain.connect(false).await.unwrap(), PATIENT);
        assert_eq!(chain.connect(false).await.unwrap(), PATIENT);
        assert_eq!(chain.connect(true).await.unwrap(), DOCTOR);
        assert_eq!(chain.account(), Some(DOCTOR));
    }

    #[tokio::test]
    async fn test_calls_require_connected_account() {
        let chain = chain();
        let err = chain
            .upload_document("QmA", DocumentType::Other, "0x00")
            .await
            .unwrap_err();
        assert_eq!(err.service, shared_types::ExternalService::Wallet);
    }

    #[tokio::test]
    async fn test_upload_assigns_sequential_ids() {
        let chain = chain();
        chain.connect(false).await.unwrap();
        let first = chain
            .upload_document("QmA", DocumentType::LabResult, "0x01")
            .await
            .unwrap();
        let second = chain
            .upload_document("QmB", DocumentType::Prescription, "0x02")
            .await
            .unwrap();
        assert_eq!((first.document_id, second.document_id), (1, 2));
        assert_ne!(first.tx_hash, second.tx_hash);
        assert_eq!(chain.get_user_documents(PATIENT).await.unwrap(), vec![1, 2]);
        assert_eq!(chain.get_document(2).await.unwrap().document_type, "prescription");
    }

    #[tokio::test]
    async fn test_owner_cannot_verify_on_chain() {
        let chain = chain();
        chain.connect(false).await.unwrap();
        chain
            .upload_document("QmA", DocumentType::LabResult, "0x01")
            .await
            .unwrap();
        assert!(chain.verify_document(1).await.is_err());

        chain.switch_to(Some(DOCTOR));
        chain.verify_document(1).await.unwrap();
        assert_eq!(chain.verifier_of(1), Some(DOCTOR));
    }

    #[tokio::test]
    async fn test_grant_and_access_check() {
        let chain = chain();
        chain.connect(false).await.unwrap();
        chain
            .upload_document("QmA", DocumentType::LabResult, "0x01")
            .await
            .unwrap();
        assert!(!chain.has_valid_access(1, HOSPITAL).await.unwrap());

        chain.batch_grant_access(&[1], &[HOSPITAL]).await.unwrap();
        assert!(chain.has_valid_access(1, HOSPITAL).await.unwrap());
        assert_eq!(chain.calls().grant.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_fail_next_is_consumed() {
        let chain = chain();
        chain.connect(false).await.unwrap();
        chain.fail_next("user rejected transaction");
        let err = chain
            .upload_document("QmA", DocumentType::Other, "0x01")
            .await
            .unwrap_err();
        assert_eq!(err.message, "user rejected transaction");
        assert!(chain
            .upload_document("QmA", DocumentType::Other, "0x01")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_account_changes_are_broadcast() {
        let chain = chain();
        let mut changes = chain.changes();
        chain.switch_to(Some(DOCTOR));
        chain.switch_network(42_220);
        assert_eq!(
            changes.recv().await.unwrap(),
            WalletChange::AccountChanged(Some(DOCTOR))
        );
        assert_eq!(changes.recv().await.unwrap(), WalletChange::NetworkChanged(42_220));
    }
}
