//! Order model and the fulfilment status machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use operis_core::{OrderId, ProductId, UserId};

/// Fulfilment lifecycle.
///
/// Transitions only move forward (or sideways to `cancelled` before the
/// goods ship); `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses an operator may move an order in this status to.
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Processing, OrderStatus::Cancelled],
            OrderStatus::Processing => &[OrderStatus::Shipping, OrderStatus::Cancelled],
            OrderStatus::Shipping => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Unit price, VND.
    pub price: i64,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Human-facing code shown to the customer (e.g. `ORD-2025-0042`).
    pub order_code: String,
    pub user_id: UserId,
    #[serde(default)]
    pub user_email: Option<String>,
    pub status: OrderStatus,
    pub total_amount: i64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<OrderStatus>,
    pub user_id: Option<UserId>,
    pub search: Option<String>,
}

impl OrderFilters {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(user_id) = &self.user_id {
            params.push(("userId", user_id.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn transitions_only_move_forward() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipping));
        assert!(OrderStatus::Shipping.can_transition_to(OrderStatus::Delivered));

        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipping));
        assert!(!OrderStatus::Shipping.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn terminal_statuses_allow_nothing() {
        for status in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(status.is_terminal());
            for next in ALL {
                assert!(!status.can_transition_to(next));
            }
        }
    }

    #[test]
    fn no_status_transitions_to_itself() {
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn filters_emit_only_present_fields() {
        let filters = OrderFilters {
            status: Some(OrderStatus::Shipping),
            search: Some("ORD-2025".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filters.params(),
            vec![
                ("status", "shipping".to_string()),
                ("search", "ORD-2025".to_string()),
            ]
        );
    }

    #[test]
    fn order_reads_normalized_payload() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "o1",
                "orderCode": "ORD-2025-0042",
                "userId": "u1",
                "status": "processing",
                "totalAmount": 1500000,
                "items": [{
                    "productId": "p1",
                    "name": "Keyboard",
                    "quantity": 2,
                    "price": 750000
                }],
                "createdAt": "2025-11-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
    }
}
