//! `operis-observability` — tracing/logging initialization for tools and
//! tests embedding the admin client.

pub mod tracing;

pub use crate::tracing::init;
