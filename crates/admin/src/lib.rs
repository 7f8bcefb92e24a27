//! `operis-admin` — the assembled back-office client.
//!
//! [`Operis`] wires one transport, one token store and one query cache
//! into every resource client, so a mutation in one area invalidates the
//! views every other area has open.

pub mod dashboard;
pub mod operis;

pub use dashboard::{DashboardClient, DashboardSnapshot};
pub use operis::Operis;
