//! Orders client.

use std::sync::Arc;

use serde::Serialize;

use operis_client::{QueryCache, Transport, cached_fetch};
use operis_core::{ClientError, ClientResult, OrderId, QueryKey};

use crate::order::{Order, OrderFilters, OrderPage, OrderStatus};

fn order_lists() -> QueryKey {
    QueryKey::lists("orders")
}

fn order_detail(id: &OrderId) -> QueryKey {
    QueryKey::detail("orders", id.as_str())
}

fn require_id(id: &OrderId) -> ClientResult<()> {
    if id.is_empty() {
        return Err(ClientError::validation(0, "order id must not be empty"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatusChange {
    status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct OrdersClient {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
}

impl OrdersClient {
    pub fn new(transport: Arc<Transport>, cache: Arc<QueryCache>) -> Self {
        Self { transport, cache }
    }

    pub async fn list(&self, filters: &OrderFilters) -> ClientResult<OrderPage> {
        let params = filters.params();
        let key = QueryKey::list("orders", &params);
        cached_fetch(&self.cache, &key, || {
            self.transport.get("/orders/admin/all", &params)
        })
        .await
    }

    pub async fn get(&self, id: &OrderId) -> ClientResult<Order> {
        require_id(id)?;
        let path = format!("/orders/{id}");
        cached_fetch(&self.cache, &order_detail(id), || {
            self.transport.get(&path, &[])
        })
        .await
    }

    /// Move an order along the fulfilment machine.
    ///
    /// The transition is checked against `current` before any request goes
    /// out, so a stale view cannot fire an impossible change; the backend
    /// enforces the same table. On success the returned order replaces the
    /// detail entry and every list view refetches.
    pub async fn update_status(
        &self,
        id: &OrderId,
        current: OrderStatus,
        next: OrderStatus,
    ) -> ClientResult<Order> {
        require_id(id)?;
        if !current.can_transition_to(next) {
            return Err(ClientError::validation(
                0,
                format!(
                    "order cannot move from {} to {}",
                    current.as_str(),
                    next.as_str()
                ),
            ));
        }

        let updated: Order = self
            .transport
            .patch(&format!("/orders/admin/{id}"), &StatusChange { status: next })
            .await?;
        self.cache.invalidate_prefix(&order_lists());
        self.cache.write_through(&order_detail(id), &updated);
        tracing::info!(order = %id, status = next.as_str(), "order status updated");
        Ok(updated)
    }

    /// Cancel an order outright. The cached detail would otherwise keep
    /// showing the old status, so it goes stale along with the lists.
    pub async fn cancel(&self, id: &OrderId) -> ClientResult<()> {
        require_id(id)?;
        self.transport.delete(&format!("/orders/{id}")).await?;
        self.cache.invalidate_prefix(&order_lists());
        self.cache.invalidate(&order_detail(id));
        tracing::info!(order = %id, "order cancelled");
        Ok(())
    }
}
