//! # Domain Value Objects
//!
//! Facilities and the read-only facility directory.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;

use super::errors::LedgerError;

/// Kind of healthcare facility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityCategory {
    /// Hospital.
    Hospital,
    /// Outpatient clinic.
    Clinic,
    /// Health insurer.
    Insurance,
    /// Medical center.
    MedicalCenter,
    /// Diagnostic laboratory.
    Laboratory,
}

impl FacilityCategory {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FacilityCategory::Hospital => "Hospital",
            FacilityCategory::Clinic => "Clinic",
            FacilityCategory::Insurance => "Insurance",
            FacilityCategory::MedicalCenter => "Medical Center",
            FacilityCategory::Laboratory => "Laboratory",
        }
    }
}

impl fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A healthcare entity that can receive access grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    /// Directory id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Receiving wallet.
    pub address: Address,
    /// Kind of facility.
    pub category: FacilityCategory,
}

/// Built-in directory entries: (id, name, address, category).
const BUILTIN_FACILITIES: [(&str, &str, &str, FacilityCategory); 5] = [
    (
        "1",
        "City General Hospital",
        "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0",
        FacilityCategory::Hospital,
    ),
    (
        "2",
        "Medicare Clinic",
        "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f",
        FacilityCategory::Clinic,
    ),
    (
        "3",
        "HealthCare Insurance Co.",
        "0xdAC17F958D2ee523a2206206994597C13D831ec7",
        FacilityCategory::Insurance,
    ),
    (
        "4",
        "Wellness Medical Center",
        "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        FacilityCategory::MedicalCenter,
    ),
    (
        "5",
        "National Lab Services",
        "0x6B175474E89094C44Da98b954EedeAC495271d0F",
        FacilityCategory::Laboratory,
    ),
];

/// Read-only directory of facilities, in listing order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityDirectory {
    facilities: Vec<Facility>,
}

impl FacilityDirectory {
    /// Build a directory from explicit entries.
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    /// The built-in demo directory.
    ///
    /// # Errors
    /// - `InvalidFacility` if a built-in address fails to parse
    pub fn builtin() -> Result<Self, LedgerError> {
        let facilities = BUILTIN_FACILITIES
            .iter()
            .map(|(id, name, address, category)| -> Result<Facility, LedgerError> {
                let address = address
                    .parse::<Address>()
                    .map_err(|e| LedgerError::InvalidFacility {
                        id: id.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(Facility {
                    id: id.to_string(),
                    name: name.to_string(),
                    address,
                    category: *category,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { facilities })
    }

    /// All facilities.
    pub fn all(&self) -> &[Facility] {
        &self.facilities
    }

    /// Case-insensitive search on name or category. An empty query matches all.
    pub fn search(&self, query: &str) -> Vec<&Facility> {
        let needle = query.trim().to_lowercase();
        self.facilities
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&needle)
                    || f.category.label().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Look up a facility by directory id.
    pub fn get(&self, id: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }

    /// Look up a facility by wallet address.
    pub fn by_address(&self, address: &Address) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.address == *address)
    }

    /// Resolve directory ids, preserving the order given.
    ///
    /// # Errors
    /// - `UnknownFacility` for the first id not in the directory
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&Facility>, LedgerError> {
        ids.iter()
            .map(|id| {
                self.get(id.as_ref())
                    .ok_or_else(|| LedgerError::UnknownFacility(id.as_ref().to_string()))
            })
            .collect()
    }

    /// Number of facilities.
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directory() {
        let dir = FacilityDirectory::builtin().unwrap();
        assert_eq!(dir.len(), 5);
        assert_eq!(dir.get("1").unwrap().name, "City General Hospital");
        assert_eq!(
            dir.get("5").unwrap().address.to_string(),
            "0x6b175474e89094c44da98b954eedeac495271d0f"
        );
    }

    #[test]
    fn test_search_by_name_and_category() {
        let dir = FacilityDirectory::builtin().unwrap();
        let hits: Vec<_> = dir.search("clinic").iter().map(|f| f.id.clone()).collect();
        assert_eq!(hits, vec!["2"]);

        let hits: Vec<_> = dir.search("LAB").iter().map(|f| f.id.clone()).collect();
        assert_eq!(hits, vec!["5"]);

        let hits: Vec<_> = dir.search("medical").iter().map(|f| f.id.clone()).collect();
        assert_eq!(hits, vec!["4"]);

        assert_eq!(dir.search("").len(), 5);
        assert!(dir.search("dentist").is_empty());
    }

    #[test]
    fn test_resolve_preserves_order() {
        let dir = FacilityDirectory::builtin().unwrap();
        let resolved = dir.resolve(&["3", "1"]).unwrap();
        assert_eq!(resolved[0].name, "HealthCare Insurance Co.");
        assert_eq!(resolved[1].name, "City General Hospital");
    }

    #[test]
    fn test_resolve_unknown_facility() {
        let dir = FacilityDirectory::builtin().unwrap();
        let result = dir.resolve(&["1", "99"]);
        assert!(matches!(result, Err(LedgerError::UnknownFacility(id)) if id == "99"));
    }

    #[test]
    fn test_by_address() {
        let dir = FacilityDirectory::builtin().unwrap();
        let addr: Address = "0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f".parse().unwrap();
        assert_eq!(dir.by_address(&addr).unwrap().id, "2");
    }
}
