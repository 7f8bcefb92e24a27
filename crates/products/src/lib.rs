//! `operis-products` — catalog administration.
//!
//! Product CRUD, category listing, and the ordered specification tables
//! (quick specs and grouped full specs) whose display order is maintained
//! client-side.

pub mod client;
pub mod product;
pub mod spec;

pub use client::ProductsClient;
pub use product::{Product, ProductFilters, ProductInput, ProductPage, ProductSort};
pub use spec::{FullSpec, SortOrdered, Spec, move_spec, push_spec, remove_spec};
