//! # Domain Value Objects
//!
//! Immutable value types for the Document Registry.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::Address;
use std::fmt;
use std::str::FromStr;

use super::errors::RegistryError;

/// Content identifier returned by the content store (an IPFS CID).
pub type ContentId = String;

/// Kinds of healthcare documents a patient can register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Health insurance card.
    InsuranceCard,
    /// General medical record.
    MedicalRecord,
    /// Identity document.
    IdProof,
    /// Prescription.
    Prescription,
    /// Laboratory result.
    LabResult,
    /// Vaccination record.
    VaccinationRecord,
    /// Medical certification.
    Certification,
    /// Anything else.
    Other,
}

impl DocumentType {
    /// Every document type, in display order.
    pub const ALL: [DocumentType; 8] = [
        DocumentType::InsuranceCard,
        DocumentType::MedicalRecord,
        DocumentType::IdProof,
        DocumentType::Prescription,
        DocumentType::LabResult,
        DocumentType::VaccinationRecord,
        DocumentType::Certification,
        DocumentType::Other,
    ];

    /// Wire value passed to the contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::InsuranceCard => "insurance_card",
            DocumentType::MedicalRecord => "medical_record",
            DocumentType::IdProof => "id_proof",
            DocumentType::Prescription => "prescription",
            DocumentType::LabResult => "lab_result",
            DocumentType::VaccinationRecord => "vaccination_record",
            DocumentType::Certification => "certification",
            DocumentType::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::InsuranceCard => "Insurance Card",
            DocumentType::MedicalRecord => "Medical Record",
            DocumentType::IdProof => "ID Proof",
            DocumentType::Prescription => "Prescription",
            DocumentType::LabResult => "Lab Result",
            DocumentType::VaccinationRecord => "Vaccination Record",
            DocumentType::Certification => "Medical Certification",
            DocumentType::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownDocumentType(s.to_string()))
    }
}

/// Verification state of a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// No verifier has attested the document.
    #[default]
    Unverified,
    /// Attested by a non-owner verifier.
    Verified {
        /// The verifying wallet.
        by: Address,
    },
}

impl VerificationStatus {
    /// Check if transition is valid. `Verified` is terminal.
    pub fn can_transition_to(&self, next: VerificationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Unverified, Self::Verified { .. })
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// Result of a verification request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// The verifier now recorded on the document.
    pub verifier: Address,
    /// False when the document was already verified and nothing changed.
    pub newly_verified: bool,
}

/// SHA-256 fingerprint of file bytes, `0x`-prefixed hex.
///
/// This is the value registered on-chain as the document's encryption hash.
pub fn content_fingerprint(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(Sha256::digest(bytes)))
}
