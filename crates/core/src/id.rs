//! Strongly-typed identifiers for backend-owned entities.
//!
//! The backend issues opaque string identifiers; the newtypes only prevent
//! mixing them up at call sites. `generate()` exists for the few values the
//! client mints itself (pricing package slugs default to a UUIDv7).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! impl_string_id {
    ($t:ident) => {
        /// Opaque backend identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh client-side identifier (UUIDv7, time-ordered).
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

impl_string_id!(UserId);
impl_string_id!(DepositId);
impl_string_id!(OrderId);
impl_string_id!(ProductId);
impl_string_id!(CronjobId);
impl_string_id!(ExecutionId);
impl_string_id!(TransactionId);
impl_string_id!(PackageId);
