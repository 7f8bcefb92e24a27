//! Token transaction ledger view (append-only, backend-owned).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use operis_core::{TransactionId, UserId};

/// Ledger entry kind. Wire values stay snake_case: normalization rewrites
/// keys, never values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Usage,
    AdminCredit,
    AdminDebit,
    Refund,
    Bonus,
}

/// One ledger entry. `amount` is signed (credit positive, debit negative);
/// `balance` is the point-in-time snapshot after the transaction, never
/// recomputed client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransaction {
    pub id: TransactionId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i64,
    pub balance: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_deposited: i64,
    pub total_spent: i64,
    pub net_change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<TokenTransaction>,
    pub total: u64,
    #[serde(default)]
    pub summary: Option<TransactionSummary>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilters {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TransactionFilters {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}
