//! Reporting periods.

use chrono::NaiveDate;

/// Time window for a statistics read.
///
/// A custom window carries both bounds by construction; there is no way
/// to build a half-open custom range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Build a custom window from two optional pickers; `None` until both
    /// are set (the UI submits nothing for a half-filled range).
    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        Some(Period::Custom {
            start: start?,
            end: end?,
        })
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Period::Custom { .. })
    }

    /// Query parameters for this window: a `period` name for presets, the
    /// `start`/`end` pair for custom ranges.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Period::Today => vec![("period", "today".to_string())],
            Period::Week => vec![("period", "week".to_string())],
            Period::Month => vec![("period", "month".to_string())],
            Period::Year => vec![("period", "year".to_string())],
            Period::Custom { start, end } => vec![
                ("start", start.format("%Y-%m-%d").to_string()),
                ("end", end.format("%Y-%m-%d").to_string()),
            ],
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Month
    }
}
