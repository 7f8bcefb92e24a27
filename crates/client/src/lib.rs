//! `operis-client` — transport, session and cache for the Operis admin API.
//!
//! This crate owns the cross-cutting client state: the single durable
//! session token, the 401 redirect guard, the HTTP transport with its
//! normalization contract, and the in-memory query cache the resource
//! clients share.

pub mod cache;
pub mod config;
pub mod redirect;
pub mod session;
pub mod token_store;
pub mod transport;

pub use cache::{QueryCache, cached_fetch};
pub use config::ClientConfig;
pub use redirect::RedirectGuard;
pub use session::{Credentials, Role, Session, SessionUser};
pub use token_store::TokenStore;
pub use transport::Transport;
