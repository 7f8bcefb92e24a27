//! Deposit model and settlement permission rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use operis_core::{DepositId, UserId};

/// Deposit lifecycle as observed by this client.
///
/// Only `pending` deposits accept operator actions; every other status is
/// terminal from the client's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Completed,
    Cancelled,
    Expired,
}

impl DepositStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Pending => "pending",
            DepositStatus::Completed => "completed",
            DepositStatus::Cancelled => "cancelled",
            DepositStatus::Expired => "expired",
        }
    }

    /// Actions the operator may take against a deposit in this status.
    /// Anything not listed here is never offered.
    pub fn available_actions(&self) -> &'static [DepositActionKind] {
        match self {
            DepositStatus::Pending => {
                &[DepositActionKind::Complete, DepositActionKind::Cancel]
            }
            _ => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.available_actions().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositActionKind {
    Complete,
    Cancel,
}

/// Operator settlement decision.
///
/// `Complete` carries the token amount actually credited as a required
/// field: manual reconciliation may diverge from the originally computed
/// amount, so the value is confirmed or overridden explicitly, never
/// inferred. `Cancel` takes only an optional reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositAction {
    Complete { tokens: i64, note: Option<String> },
    Cancel { note: Option<String> },
}

impl DepositAction {
    pub fn kind(&self) -> DepositActionKind {
        match self {
            DepositAction::Complete { .. } => DepositActionKind::Complete,
            DepositAction::Cancel { .. } => DepositActionKind::Cancel,
        }
    }

    /// True when a deposit in `status` offers this action.
    pub fn allowed_for(&self, status: DepositStatus) -> bool {
        status.available_actions().contains(&self.kind())
    }
}

/// Bank transfer details shown to the depositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub amount: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: DepositId,
    pub user_id: UserId,
    #[serde(default)]
    pub user_email: Option<String>,
    pub status: DepositStatus,
    /// VND, integer.
    pub amount: i64,
    pub tokens: i64,
    #[serde(default)]
    pub payment_info: Option<PaymentInfo>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositSummary {
    pub total_amount: i64,
    pub total_tokens: i64,
    pub pending_count: u64,
    pub completed_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositPage {
    pub deposits: Vec<Deposit>,
    pub total: u64,
    #[serde(default)]
    pub summary: Option<DepositSummary>,
}

/// Deposit list filters; absent fields are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepositFilters {
    pub user_id: Option<UserId>,
    pub status: Option<DepositStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl DepositFilters {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(user_id) = &self.user_id {
            params.push(("userId", user_id.to_string()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(from) = &self.from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = &self.to {
            params.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}
