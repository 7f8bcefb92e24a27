//! Billing surface: deposit review and settlement, the token ledger, and
//! the pricing document.

use std::sync::Arc;

use serde::Serialize;

use operis_client::{QueryCache, Transport, cached_fetch};
use operis_core::{ClientError, ClientResult, DepositId, QueryKey};

use crate::deposit::{DepositAction, DepositActionKind, DepositFilters, DepositPage};
use crate::pricing::DepositPricing;
use crate::transaction::{TransactionFilters, TransactionPage};

fn deposit_lists() -> QueryKey {
    QueryKey::lists("deposits")
}

fn transaction_lists() -> QueryKey {
    QueryKey::lists("transactions")
}

fn pricing_key() -> QueryKey {
    QueryKey::singleton("pricing")
}

/// One settlement request covers both outcomes; the backend validates the
/// deposit is still pending.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettleDepositRequest<'a> {
    deposit_id: &'a DepositId,
    action: DepositActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct BillingClient {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
}

impl BillingClient {
    pub fn new(transport: Arc<Transport>, cache: Arc<QueryCache>) -> Self {
        Self { transport, cache }
    }

    /// Filtered deposit page, served from cache when fresh.
    pub async fn list_deposits(&self, filters: &DepositFilters) -> ClientResult<DepositPage> {
        let params = filters.params();
        let key = QueryKey::list("deposits", &params);
        cached_fetch(&self.cache, &key, || {
            self.transport.get("/deposits/admin/all", &params)
        })
        .await
    }

    /// Complete or cancel a pending deposit. Every open deposit list
    /// refetches afterwards, and a completion also stales the ledger since
    /// crediting tokens appends a transaction. The backend rejects
    /// non-pending deposits.
    pub async fn settle_deposit(&self, id: &DepositId, action: &DepositAction) -> ClientResult<()> {
        if id.is_empty() {
            return Err(ClientError::validation(0, "deposit id must not be empty"));
        }
        let request = match action {
            DepositAction::Complete { tokens, note } => SettleDepositRequest {
                deposit_id: id,
                action: DepositActionKind::Complete,
                tokens: Some(*tokens),
                note: note.as_deref(),
            },
            DepositAction::Cancel { note } => SettleDepositRequest {
                deposit_id: id,
                action: DepositActionKind::Cancel,
                tokens: None,
                note: note.as_deref(),
            },
        };

        self.transport
            .post_unit("/deposits/admin/tokens", &request)
            .await?;
        tracing::info!(deposit = %id, action = ?request.action, "deposit settled");
        self.cache.invalidate_prefix(&deposit_lists());
        if matches!(action, DepositAction::Complete { .. }) {
            self.cache.invalidate_prefix(&transaction_lists());
        }
        Ok(())
    }

    /// Platform-wide token transaction ledger.
    pub async fn list_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> ClientResult<TransactionPage> {
        let params = filters.params();
        let key = QueryKey::list("transactions", &params);
        cached_fetch(&self.cache, &key, || {
            self.transport.get("/tokens/admin/all", &params)
        })
        .await
    }

    /// The singleton pricing document.
    pub async fn pricing(&self) -> ClientResult<DepositPricing> {
        cached_fetch(&self.cache, &pricing_key(), || {
            self.transport.get("/deposits/pricing", &[])
        })
        .await
    }

    /// Submit the whole edited document (read-modify-write; no per-package
    /// endpoint exists). The response is written through, so the next read
    /// sees the accepted version without refetching.
    pub async fn update_pricing(&self, pricing: &DepositPricing) -> ClientResult<DepositPricing> {
        let updated: DepositPricing = self
            .transport
            .put("/deposits/admin/pricing", pricing)
            .await?;
        self.cache.write_through(&pricing_key(), &updated);
        tracing::info!("deposit pricing updated");
        Ok(updated)
    }
}
