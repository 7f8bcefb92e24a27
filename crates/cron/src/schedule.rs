//! Schedule builder.
//!
//! Most operators use simple mode ("every N minutes/hours/days"); the
//! produced expression always fires at the top of the larger unit, so
//! "every 2 hours" is minute zero of every second hour, not two hours
//! from whenever the job was saved. Advanced mode accepts a raw
//! five-field expression verbatim.

use serde::{Deserialize, Serialize};

use operis_core::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleUnit {
    Minutes,
    Hours,
    Days,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// Simple mode: every `value` of `unit`.
    Every { value: u32, unit: ScheduleUnit },
    /// Advanced mode: a raw five-field cron expression.
    Expression(String),
}

impl Schedule {
    pub fn every(value: u32, unit: ScheduleUnit) -> Self {
        Schedule::Every { value, unit }
    }

    /// Render the five-field cron expression, validating first.
    pub fn cron_expression(&self) -> ClientResult<String> {
        match self {
            Schedule::Every { value: 0, .. } => Err(ClientError::validation(
                0,
                "schedule interval must be at least 1",
            )),
            Schedule::Every { value: 1, unit } => Ok(match unit {
                ScheduleUnit::Minutes => "* * * * *".to_string(),
                ScheduleUnit::Hours => "0 * * * *".to_string(),
                ScheduleUnit::Days => "0 0 * * *".to_string(),
            }),
            Schedule::Every { value, unit } => Ok(match unit {
                ScheduleUnit::Minutes => format!("*/{value} * * * *"),
                ScheduleUnit::Hours => format!("0 */{value} * * *"),
                ScheduleUnit::Days => format!("0 0 */{value} * *"),
            }),
            Schedule::Expression(raw) => {
                let trimmed = raw.trim();
                if trimmed.split_whitespace().count() != 5 {
                    return Err(ClientError::validation(
                        0,
                        format!("cron expression must have exactly 5 fields: {raw:?}"),
                    ));
                }
                Ok(trimmed.to_string())
            }
        }
    }
}
