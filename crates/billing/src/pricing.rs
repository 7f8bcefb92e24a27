//! Deposit pricing: a singleton document edited as a whole.
//!
//! There are no per-package endpoints; add/edit/remove produce the
//! complete new `packages` array client-side and the entire document is
//! submitted. Concurrent admin edits are not reconciled (last write wins).

use serde::{Deserialize, Serialize};

/// A predefined deposit package. `id` is an operator-chosen slug
/// (`starter`, `pro`, ...), immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositPackage {
    pub id: String,
    pub name: String,
    pub tokens: i64,
    /// VND.
    pub price: i64,
    #[serde(default)]
    pub bonus: i64,
    #[serde(default)]
    pub popular: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositPricing {
    pub price_per_million: i64,
    pub minimum_tokens: i64,
    pub minimum_vnd: i64,
    #[serde(default)]
    pub packages: Vec<DepositPackage>,
}

impl DepositPricing {
    /// Replace the package with a matching id, or append a new one.
    pub fn upsert_package(&mut self, package: DepositPackage) {
        match self.packages.iter_mut().find(|p| p.id == package.id) {
            Some(existing) => *existing = package,
            None => self.packages.push(package),
        }
    }

    /// Drop a package by id; unknown ids are a no-op.
    pub fn remove_package(&mut self, id: &str) {
        self.packages.retain(|p| p.id != id);
    }

    pub fn package(&self, id: &str) -> Option<&DepositPackage> {
        self.packages.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing() -> DepositPricing {
        DepositPricing {
            price_per_million: 20_000,
            minimum_tokens: 500_000,
            minimum_vnd: 10_000,
            packages: vec![
                DepositPackage {
                    id: "starter".to_string(),
                    name: "Starter".to_string(),
                    tokens: 1_000_000,
                    price: 20_000,
                    bonus: 0,
                    popular: false,
                },
                DepositPackage {
                    id: "pro".to_string(),
                    name: "Pro".to_string(),
                    tokens: 10_000_000,
                    price: 180_000,
                    bonus: 500_000,
                    popular: true,
                },
            ],
        }
    }

    #[test]
    fn upsert_replaces_existing_package_in_place() {
        let mut doc = pricing();
        doc.upsert_package(DepositPackage {
            id: "starter".to_string(),
            name: "Starter+".to_string(),
            tokens: 1_200_000,
            price: 22_000,
            bonus: 100_000,
            popular: false,
        });

        assert_eq!(doc.packages.len(), 2);
        assert_eq!(doc.packages[0].name, "Starter+");
        assert_eq!(doc.packages[1].id, "pro");
    }

    #[test]
    fn upsert_appends_new_package() {
        let mut doc = pricing();
        doc.upsert_package(DepositPackage {
            id: "max".to_string(),
            name: "Max".to_string(),
            tokens: 50_000_000,
            price: 800_000,
            bonus: 5_000_000,
            popular: false,
        });
        assert_eq!(doc.packages.len(), 3);
        assert_eq!(doc.packages[2].id, "max");
    }

    #[test]
    fn remove_drops_only_the_matching_package() {
        let mut doc = pricing();
        doc.remove_package("starter");
        assert_eq!(doc.packages.len(), 1);
        assert_eq!(doc.packages[0].id, "pro");

        doc.remove_package("unknown");
        assert_eq!(doc.packages.len(), 1);
    }

    #[test]
    fn document_roundtrips_camel_case() {
        let doc = pricing();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("pricePerMillion").is_some());
        assert!(json.get("minimumVnd").is_some());
        let back: DepositPricing = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
