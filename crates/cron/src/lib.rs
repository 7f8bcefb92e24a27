//! `operis-cron` — scheduled HTTP job administration.
//!
//! The simple-mode schedule builder (every N minutes/hours/days to a cron
//! expression), the job and execution models, and the admin client.

pub mod client;
pub mod model;
pub mod schedule;

pub use client::CronjobsClient;
pub use model::{
    Cronjob, CronjobExecution, CronjobFilters, CronjobInput, CronjobPage, ExecutionFilters,
    ExecutionPage, ExecutionStatus, SchedulerStatus,
};
pub use schedule::{Schedule, ScheduleUnit};
