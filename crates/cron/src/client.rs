//! Cronjobs client.

use std::sync::Arc;

use operis_client::{QueryCache, Transport, cached_fetch};
use operis_core::{ClientError, ClientResult, CronjobId, QueryKey};

use crate::model::{
    Cronjob, CronjobFilters, CronjobInput, CronjobPage, ExecutionFilters, ExecutionPage,
    SchedulerStatus,
};
use crate::schedule::Schedule;

fn cronjob_lists() -> QueryKey {
    QueryKey::lists("cronjobs")
}

fn cronjob_detail(id: &CronjobId) -> QueryKey {
    QueryKey::detail("cronjobs", id.as_str())
}

fn scheduler_key() -> QueryKey {
    QueryKey::root("cronjobs").child("scheduler")
}

fn require_id(id: &CronjobId) -> ClientResult<()> {
    if id.is_empty() {
        return Err(ClientError::validation(0, "cronjob id must not be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CronjobsClient {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
}

impl CronjobsClient {
    pub fn new(transport: Arc<Transport>, cache: Arc<QueryCache>) -> Self {
        Self { transport, cache }
    }

    pub async fn list(&self, filters: &CronjobFilters) -> ClientResult<CronjobPage> {
        let params = filters.params();
        let key = QueryKey::list("cronjobs", &params);
        cached_fetch(&self.cache, &key, || {
            self.transport.get("/cron/admin/all", &params)
        })
        .await
    }

    pub async fn get(&self, id: &CronjobId) -> ClientResult<Cronjob> {
        require_id(id)?;
        let path = format!("/cron/{id}");
        cached_fetch(&self.cache, &cronjob_detail(id), || {
            self.transport.get(&path, &[])
        })
        .await
    }

    /// Execution history for one job, newest first.
    pub async fn executions(
        &self,
        id: &CronjobId,
        filters: &ExecutionFilters,
    ) -> ClientResult<ExecutionPage> {
        require_id(id)?;
        let params = filters.params();
        let key = cronjob_detail(id).child("executions").with_params(&params);
        let path = format!("/cron/{id}/executions");
        cached_fetch(&self.cache, &key, || self.transport.get(&path, &params)).await
    }

    /// Create a job. The schedule is rendered and validated here, so a
    /// malformed expression never leaves the client.
    pub async fn create(
        &self,
        name: &str,
        schedule: &Schedule,
        url: &str,
    ) -> ClientResult<Cronjob> {
        let input = CronjobInput {
            name: name.to_string(),
            schedule: schedule.cron_expression()?,
            url: url.to_string(),
            method: None,
            enabled: Some(true),
        };
        let created: Cronjob = self.transport.post("/cron", &input).await?;
        self.cache.invalidate_prefix(&cronjob_lists());
        self.cache.write_through(&cronjob_detail(&created.id), &created);
        tracing::info!(cronjob = %created.id, schedule = %created.schedule, "cronjob created");
        Ok(created)
    }

    /// Enable or disable a job. The returned job is the authoritative state.
    pub async fn toggle(&self, id: &CronjobId, enabled: bool) -> ClientResult<Cronjob> {
        require_id(id)?;
        let updated: Cronjob = self
            .transport
            .post(
                &format!("/cron/{id}/toggle"),
                &serde_json::json!({ "enabled": enabled }),
            )
            .await?;
        self.cache.invalidate_prefix(&cronjob_lists());
        self.cache.write_through(&cronjob_detail(id), &updated);
        tracing::info!(cronjob = %id, enabled = updated.enabled, "cronjob toggled");
        Ok(updated)
    }

    /// Fire a job immediately, outside its schedule. The execution history
    /// goes stale so the new run shows up on the next read.
    pub async fn run_now(&self, id: &CronjobId) -> ClientResult<()> {
        require_id(id)?;
        self.transport
            .post_unit(&format!("/cron/{id}/run"), &serde_json::json!({}))
            .await?;
        self.cache.invalidate_prefix(&cronjob_detail(id));
        tracing::info!(cronjob = %id, "cronjob triggered manually");
        Ok(())
    }

    pub async fn delete(&self, id: &CronjobId) -> ClientResult<()> {
        require_id(id)?;
        self.transport.delete(&format!("/cron/{id}")).await?;
        self.cache.invalidate_prefix(&cronjob_lists());
        self.cache.invalidate_prefix(&cronjob_detail(id));
        tracing::info!(cronjob = %id, "cronjob deleted");
        Ok(())
    }

    pub async fn scheduler_status(&self) -> ClientResult<SchedulerStatus> {
        cached_fetch(&self.cache, &scheduler_key(), || {
            self.transport.get("/cron/scheduler/status", &[])
        })
        .await
    }
}
