//! Top-level client assembly.

use std::sync::Arc;

use operis_analytics::AnalyticsClient;
use operis_billing::BillingClient;
use operis_client::{ClientConfig, QueryCache, Session, TokenStore, Transport};
use operis_core::ClientResult;
use operis_cron::CronjobsClient;
use operis_orders::OrdersClient;
use operis_products::ProductsClient;
use operis_users::UsersClient;

use crate::dashboard::DashboardClient;

/// The whole back-office client: one shared transport, token store and
/// cache behind per-resource clients.
#[derive(Debug, Clone)]
pub struct Operis {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
    pub session: Session,
    pub users: UsersClient,
    pub billing: BillingClient,
    pub orders: OrdersClient,
    pub products: ProductsClient,
    pub cron: CronjobsClient,
    pub analytics: AnalyticsClient,
    pub dashboard: DashboardClient,
}

impl Operis {
    /// Build against the configured backend with the on-disk token store,
    /// resuming a previously persisted session when one exists.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(&ClientConfig::from_env(), Arc::new(TokenStore::open()))
    }

    pub fn new(config: &ClientConfig, tokens: Arc<TokenStore>) -> ClientResult<Self> {
        let transport = Arc::new(Transport::new(config, Arc::clone(&tokens))?);
        let cache = Arc::new(QueryCache::new());

        let session = Session::new(
            Arc::clone(&transport),
            Arc::clone(&cache),
            Arc::clone(&tokens),
        );
        let billing = BillingClient::new(Arc::clone(&transport), Arc::clone(&cache));
        let analytics = AnalyticsClient::new(Arc::clone(&transport), Arc::clone(&cache));
        let users = UsersClient::new(Arc::clone(&transport), Arc::clone(&cache));

        Ok(Self {
            session,
            orders: OrdersClient::new(Arc::clone(&transport), Arc::clone(&cache)),
            products: ProductsClient::new(Arc::clone(&transport), Arc::clone(&cache)),
            cron: CronjobsClient::new(Arc::clone(&transport), Arc::clone(&cache)),
            dashboard: DashboardClient::new(analytics.clone(), billing.clone(), users.clone()),
            users,
            billing,
            analytics,
            transport,
            cache,
        })
    }

    /// Register the navigation callback fired when the session dies (a 401
    /// anywhere, or an explicit logout).
    pub fn on_unauthorized(&self, handler: impl Fn() + Send + Sync + 'static) {
        self.transport.set_unauthorized_handler(handler);
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }
}
