//! # Domain Value Objects
//!
//! The claim catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ProofError;

/// A fact that can be proven about a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// Holder is an adult.
    AgeAbove18,
    /// Holder is of legal drinking age.
    AgeAbove21,
    /// Holder has a valid prescription.
    HasValidPrescription,
    /// Holder has active insurance coverage.
    IsInsured,
}

impl ClaimType {
    /// Every claim, in display order.
    pub const ALL: [ClaimType; 4] = [
        ClaimType::AgeAbove18,
        ClaimType::AgeAbove21,
        ClaimType::HasValidPrescription,
        ClaimType::IsInsured,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::AgeAbove18 => "age_above_18",
            ClaimType::AgeAbove21 => "age_above_21",
            ClaimType::HasValidPrescription => "has_valid_prescription",
            ClaimType::IsInsured => "is_insured",
        }
    }

    /// Short label.
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::AgeAbove18 => "Age > 18",
            ClaimType::AgeAbove21 => "Age > 21",
            ClaimType::HasValidPrescription => "Valid Prescription",
            ClaimType::IsInsured => "Active Insurance",
        }
    }

    /// What the claim proves and what it keeps private.
    pub fn description(&self) -> &'static str {
        match self {
            ClaimType::AgeAbove18 => "Prove you are an adult without revealing DOB",
            ClaimType::AgeAbove21 => {
                "Prove you are of legal drinking age without revealing DOB"
            }
            ClaimType::HasValidPrescription => {
                "Prove possession of a valid Rx without revealing condition"
            }
            ClaimType::IsInsured => "Prove active coverage without revealing provider details",
        }
    }

    /// Public threshold for range claims.
    pub fn threshold(&self) -> Option<u32> {
        match self {
            ClaimType::AgeAbove18 => Some(18),
            ClaimType::AgeAbove21 => Some(21),
            _ => None,
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimType {
    type Err = ProofError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ProofError::UnknownClaim(s.to_string()))
    }
}
