//! `operis-users` — account administration.
//!
//! Listing and searching accounts, profile edits, account deletion, manual
//! token top-ups, and the per-user deposit and transaction drill-downs.

pub mod client;
pub mod user;

pub use client::UsersClient;
pub use user::{Pagination, SortOrder, TopupRequest, User, UserFilters, UserPage, UserUpdate};
