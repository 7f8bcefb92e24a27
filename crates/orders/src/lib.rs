//! `operis-orders` — order review and fulfilment state.
//!
//! The order status machine lives here: which transitions an operator may
//! apply is decided client-side before any request is sent, and verified
//! again by the backend.

pub mod client;
pub mod order;

pub use client::OrdersClient;
pub use order::{Order, OrderFilters, OrderItem, OrderPage, OrderStatus};
