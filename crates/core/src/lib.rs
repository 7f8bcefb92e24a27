//! `operis-core` — foundation building blocks for the Operis admin client.
//!
//! This crate contains **pure** primitives shared by every resource client:
//! the error taxonomy, typed identifiers, the wire-to-model key-casing
//! transform, and canonical cache keys. No HTTP or I/O concerns live here.

pub mod casing;
pub mod error;
pub mod id;
pub mod query_key;

pub use casing::{camelize, camelize_key};
pub use error::{ClientError, ClientResult};
pub use id::{
    CronjobId, DepositId, ExecutionId, OrderId, PackageId, ProductId, TransactionId, UserId,
};
pub use query_key::QueryKey;
