//! `operis-billing` — deposits, token transactions and deposit pricing.
//!
//! Carries the deposit settlement permission rules (only `pending`
//! deposits may be completed or cancelled) and the read-modify-write
//! editing of the singleton pricing document.

pub mod client;
pub mod deposit;
pub mod pricing;
pub mod transaction;

pub use client::BillingClient;
pub use deposit::{
    Deposit, DepositAction, DepositActionKind, DepositFilters, DepositPage, DepositStatus,
    DepositSummary, PaymentInfo,
};
pub use pricing::{DepositPackage, DepositPricing};
pub use transaction::{TokenTransaction, TransactionFilters, TransactionPage, TransactionType};
