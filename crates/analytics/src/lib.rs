//! `operis-analytics` — platform and per-user usage statistics.

pub mod client;
pub mod period;
pub mod stats;

pub use client::AnalyticsClient;
pub use period::Period;
pub use stats::{PeriodStats, PlatformOverview, UserPeriodStats, UserStats, percent_change};
