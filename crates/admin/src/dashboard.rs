//! Dashboard composition.
//!
//! The landing view needs several independent reads; they run
//! concurrently and the snapshot carries whatever succeeded. Only the
//! headline overview is required, the side panels degrade to empty.

use operis_analytics::{AnalyticsClient, Period, PlatformOverview};
use operis_billing::{
    BillingClient, Deposit, DepositFilters, DepositStatus, DepositSummary, TokenTransaction,
    TransactionFilters,
};
use operis_core::ClientResult;
use operis_users::{UserFilters, UsersClient};

const RECENT_LIMIT: u32 = 5;

/// Everything the landing view renders in one shot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub overview: PlatformOverview,
    /// Registered accounts; `None` when the users read failed.
    pub total_users: Option<u64>,
    pub deposit_summary: Option<DepositSummary>,
    pub pending_deposits: Vec<Deposit>,
    pub recent_transactions: Vec<TokenTransaction>,
}

#[derive(Debug, Clone)]
pub struct DashboardClient {
    analytics: AnalyticsClient,
    billing: BillingClient,
    users: UsersClient,
}

impl DashboardClient {
    pub fn new(analytics: AnalyticsClient, billing: BillingClient, users: UsersClient) -> Self {
        Self {
            analytics,
            billing,
            users,
        }
    }

    /// Load the landing view for a reporting window.
    pub async fn load(&self, period: Period) -> ClientResult<DashboardSnapshot> {
        // One-row page; only the pagination total is wanted.
        let user_filters = UserFilters {
            page: Some(1),
            limit: Some(1),
            ..Default::default()
        };
        let deposit_filters = DepositFilters {
            status: Some(DepositStatus::Pending),
            limit: Some(RECENT_LIMIT),
            ..Default::default()
        };
        let transaction_filters = TransactionFilters {
            limit: Some(RECENT_LIMIT),
            offset: None,
        };

        let (overview, users, deposits, transactions) = tokio::join!(
            self.analytics.overview(period),
            self.users.list(&user_filters),
            self.billing.list_deposits(&deposit_filters),
            self.billing.list_transactions(&transaction_filters),
        );

        let total_users = match users {
            Ok(page) => Some(page.pagination.total),
            Err(e) => {
                tracing::warn!("dashboard user count unavailable: {e}");
                None
            }
        };
        let (deposit_summary, pending_deposits) = match deposits {
            Ok(page) => (page.summary, page.deposits),
            Err(e) => {
                tracing::warn!("dashboard deposits panel unavailable: {e}");
                (None, Vec::new())
            }
        };
        let recent_transactions = match transactions {
            Ok(page) => page.transactions,
            Err(e) => {
                tracing::warn!("dashboard transactions panel unavailable: {e}");
                Vec::new()
            }
        };

        Ok(DashboardSnapshot {
            overview: overview?,
            total_users,
            deposit_summary,
            pending_deposits,
            recent_transactions,
        })
    }
}
