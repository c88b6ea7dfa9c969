// Weekly aggregation over a user's entries.
//
// Each entry contributes the part of its span that falls inside the week.
// Open entries run until `now` for the computation only. Conflicted entries
// still count, and their presence is reported so callers can warn that the
// total may be off.

use std::collections::HashMap;

use serde::Serialize;

use crate::modules::time_entries::core::interval::TimeRange;
use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus};

pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;
pub const DEFAULT_WEEKLY_TARGET_HOURS: f64 = 16.0;

/// Weekly hour targets: a global default plus per-user overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTargets {
    default_hours: f64,
    per_user: HashMap<String, f64>,
}

impl Default for WeeklyTargets {
    fn default() -> Self {
        Self::new(DEFAULT_WEEKLY_TARGET_HOURS)
    }
}

impl WeeklyTargets {
    pub fn new(default_hours: f64) -> Self {
        Self {
            default_hours,
            per_user: HashMap::new(),
        }
    }

    pub fn with_override(mut self, user_id: impl Into<String>, hours: f64) -> Self {
        self.per_user.insert(user_id.into(), hours);
        self
    }

    /// Explicit request value, then the user's override, then the default.
    pub fn resolve(&self, user_id: &str, requested: Option<f64>) -> f64 {
        requested
            .or_else(|| self.per_user.get(user_id).copied())
            .unwrap_or(self.default_hours)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub user_id: String,
    pub year: i32,
    pub week: u32,
    pub total_millis: i64,
    pub total_hours: f64,
    pub target_hours: f64,
    /// Negative when the user is under target.
    pub overtime_hours: f64,
    pub has_unresolved_conflicts: bool,
    pub entry_count: usize,
}

pub fn summarize(
    user_id: &str,
    (year, week): (i32, u32),
    bounds: TimeRange,
    entries: &[LoadedEntry],
    target_hours: f64,
    now: i64,
) -> WeeklySummary {
    let mut total_millis = 0;
    let mut entry_count = 0;
    let mut has_unresolved_conflicts = false;

    for loaded in entries.iter().filter(|loaded| !loaded.entry.is_deleted()) {
        let Some(clipped) = loaded.entry.span(now).clip(&bounds) else {
            continue;
        };
        total_millis += clipped.length();
        entry_count += 1;
        has_unresolved_conflicts |= loaded.entry.sync_status == SyncStatus::Conflict;
    }

    let total_hours = total_millis as f64 / MILLIS_PER_HOUR;
    WeeklySummary {
        user_id: user_id.to_string(),
        year,
        week,
        total_millis,
        total_hours,
        target_hours,
        overtime_hours: total_hours - target_hours,
        has_unresolved_conflicts,
        entry_count,
    }
}
