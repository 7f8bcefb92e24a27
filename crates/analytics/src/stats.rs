//! Statistics payloads.

use serde::{Deserialize, Serialize};

/// Aggregates for one time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    /// VND.
    #[serde(default)]
    pub revenue: i64,
    /// VND deposited.
    #[serde(default)]
    pub deposits: i64,
    #[serde(default)]
    pub tokens_used: i64,
    #[serde(default)]
    pub new_users: u64,
    #[serde(default)]
    pub orders: u64,
}

/// Platform-wide overview; `previous` covers the window immediately
/// before `stats` and feeds the trend arrows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverview {
    // Older backend versions emitted this field as `current`.
    #[serde(alias = "current")]
    pub stats: PeriodStats,
    #[serde(default)]
    pub previous: Option<PeriodStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPeriodStats {
    #[serde(default)]
    pub tokens_used: i64,
    #[serde(default)]
    pub requests: u64,
    /// VND deposited.
    #[serde(default)]
    pub deposits: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(alias = "current")]
    pub stats: UserPeriodStats,
    #[serde(default)]
    pub previous: Option<UserPeriodStats>,
}

/// Percentage change between two windows; `None` when the previous window
/// is zero (rendered as "new" rather than a division blow-up).
pub fn percent_change(current: i64, previous: i64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    Some((current - previous) as f64 / previous as f64 * 100.0)
}
