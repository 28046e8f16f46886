//! # Vault Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{Address, DocumentId, TxHash, UpstreamError};
use uuid::Uuid;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    // =========================================================================
    // SUBSYSTEM 1: DOCUMENT REGISTRY
    // =========================================================================
    /// A document was stored, registered on-chain and added to the registry.
    DocumentUploaded {
        /// Contract-assigned identifier.
        document_id: DocumentId,
        /// Uploading wallet.
        owner: Address,
        /// Wire value of the document type.
        document_type: String,
        /// Content-store identifier.
        content_id: String,
        /// Upload transaction.
        tx_hash: TxHash,
    },

    /// A verifier attested a document.
    DocumentVerified {
        /// The attested document.
        document_id: DocumentId,
        /// The recorded verifier. On a repeat attempt this is the first one.
        verifier: Address,
        /// Whether a contract transaction was sent.
        on_chain: bool,
        /// The verification transaction, when one was sent.
        tx_hash: Option<TxHash>,
    },

    /// A document entered or left the share selection.
    SelectionChanged {
        /// The toggled document.
        document_id: DocumentId,
        /// Whether it is now selected.
        selected: bool,
        /// Selection size after the toggle.
        selection_size: usize,
    },

    // =========================================================================
    // SUBSYSTEM 2: ACCESS LEDGER
    // =========================================================================
    /// A batched access grant was executed and recorded.
    AccessGranted {
        /// Ledger entry id.
        grant_id: Uuid,
        /// Granting owner.
        owner: Address,
        /// Shared documents.
        document_ids: Vec<DocumentId>,
        /// Receiving facilities.
        facility_addresses: Vec<Address>,
        /// Grant transaction.
        tx_hash: TxHash,
    },

    // =========================================================================
    // SUBSYSTEM 3: CLAIM PROOFS
    // =========================================================================
    /// A claim proof was generated.
    ProofGenerated {
        /// Proof identifier.
        proof_id: String,
        /// Document the claim is about.
        document_id: DocumentId,
        /// Wire value of the claim.
        claim_type: String,
    },

    // =========================================================================
    // SESSION
    // =========================================================================
    /// The active account or network changed.
    WalletChanged {
        /// New account, `None` when disconnected.
        account: Option<Address>,
        /// New chain id, when known.
        chain_id: Option<u64>,
    },

    /// An action was refused before any external call completed.
    ActionRejected {
        /// Action name, e.g. `grant_access`.
        action: String,
        /// Rendered error.
        reason: String,
    },

    /// An external collaborator failed; local state is unchanged.
    UpstreamFailed {
        /// Action name.
        action: String,
        /// Failing collaborator.
        service: String,
        /// Message as reported.
        message: String,
    },

    /// A subscriber fell behind and lost events. Receivers should re-read
    /// session state instead of trusting their incremental view.
    EventsMissed {
        /// Number of events lost.
        skipped: u64,
    },
}

impl VaultEvent {
    /// Build an `UpstreamFailed` event from an upstream error.
    #[must_use]
    pub fn upstream_failed(action: &str, error: &UpstreamError) -> Self {
        Self::UpstreamFailed {
            action: action.to_string(),
            service: error.service.to_string(),
            message: error.message.clone(),
        }
    }

    /// Build an `ActionRejected` event.
    #[must_use]
    pub fn rejected(action: &str, reason: impl std::fmt::Display) -> Self {
        Self::ActionRejected {
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::DocumentUploaded { .. }
            | Self::DocumentVerified { .. }
            | Self::SelectionChanged { .. } => EventTopic::Documents,
            Self::AccessGranted { .. } => EventTopic::Sharing,
            Self::ProofGenerated { .. } => EventTopic::Proofs,
            Self::WalletChanged { .. } => EventTopic::Wallet,
            Self::ActionRejected { .. }
            | Self::UpstreamFailed { .. }
            | Self::EventsMissed { .. } => EventTopic::Failures,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Uploads, verification and selection.
    Documents,
    /// Access grants.
    Sharing,
    /// Claim proofs.
    Proofs,
    /// Account and network changes.
    Wallet,
    /// Rejected actions, upstream failures and missed events.
    Failures,
    /// All events (no filtering).
    All,
}

/// Topic filter for a subscription.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Accept every event.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Accept only the given topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event passes this filter.
    #[must_use]
    pub fn matches(&self, event: &VaultEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
