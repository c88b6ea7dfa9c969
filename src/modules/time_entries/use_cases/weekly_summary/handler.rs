use std::sync::Arc;
use std::time::Duration;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::iso_week::{week_bounds, week_of};
use crate::modules::time_entries::use_cases::decision::{DecideError, validate_user};
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::weekly_summary::summary::{
    WeeklySummary, WeeklyTargets, summarize,
};
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::timeout::with_timeout;

/// Missing `year`/`week` select the ISO week containing the current time.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeWeeklySummary {
    pub user_id: String,
    pub year: Option<i32>,
    pub week: Option<u32>,
    pub target_hours: Option<f64>,
}

pub struct WeeklySummaryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    store: Arc<TStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
    targets: WeeklyTargets,
}

impl<TStore> WeeklySummaryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(
        store: Arc<TStore>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
        targets: WeeklyTargets,
    ) -> Self {
        Self {
            store,
            clock,
            timeout,
            targets,
        }
    }

    pub async fn handle(&self, query: ComputeWeeklySummary) -> Result<WeeklySummary, ApplicationError> {
        validate_user(&query.user_id)?;
        if let Some(hours) = query.target_hours.filter(|h| !h.is_finite() || *h < 0.0) {
            return Err(DecideError::InvalidTargetHours(hours.to_string()).into());
        }
        let now = self.clock.now_millis();
        let (year, week) = match (query.year, query.week) {
            (Some(year), Some(week)) => (year, week),
            (year, week) => {
                let (current_year, current_week) = week_of(now).ok_or(DecideError::InvalidWeek {
                    year: year.unwrap_or_default(),
                    week: week.unwrap_or_default(),
                })?;
                (year.unwrap_or(current_year), week.unwrap_or(current_week))
            }
        };
        let bounds = week_bounds(year, week).ok_or(DecideError::InvalidWeek { year, week })?;

        let entries = with_timeout(
            self.timeout,
            self.store.list_by_user(&query.user_id, bounds, false),
        )
        .await??;

        let target_hours = self.targets.resolve(&query.user_id, query.target_hours);
        let summary = summarize(&query.user_id, (year, week), bounds, &entries, target_hours, now);
        if summary.has_unresolved_conflicts {
            tracing::warn!(user_id = %query.user_id, year, week, "weekly summary includes conflicted entries");
        }
        Ok(summary)
    }
}
