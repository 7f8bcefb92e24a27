//! Job and execution models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use operis_core::{CronjobId, ExecutionId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cronjob {
    pub id: CronjobId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub name: String,
    /// Five-field cron expression as stored by the backend.
    pub schedule: String,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    pub enabled: bool,
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_run_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Outcome of one run; the failed state travels as `failure` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Running,
    Success,
    #[serde(rename = "failure")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronjobExecution {
    pub id: ExecutionId,
    pub cronjob_id: CronjobId,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronjobPage {
    pub cronjobs: Vec<Cronjob>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPage {
    pub executions: Vec<CronjobExecution>,
    pub total: u64,
}

/// Scheduler health as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    pub running: bool,
    pub active_jobs: u64,
    #[serde(default)]
    pub last_tick_at: Option<DateTime<Utc>>,
}

/// Paging for the append-only execution history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionFilters {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ExecutionFilters {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CronjobFilters {
    pub user_id: Option<UserId>,
    pub enabled: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl CronjobFilters {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(user_id) = &self.user_id {
            params.push(("userId", user_id.to_string()));
        }
        if let Some(enabled) = self.enabled {
            params.push(("enabled", enabled.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

/// Creation payload; the schedule is rendered to its cron expression
/// before this is built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CronjobInput {
    pub name: String,
    pub schedule: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}
