use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::time_entries::use_cases::weekly_summary::handler::ComputeWeeklySummary;
use crate::modules::time_entries::use_cases::weekly_summary::summary::WeeklySummary;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlWeeklySummary {
    pub user_id: String,
    pub year: i32,
    pub week: i32,
    pub total_hours: f64,
    pub target_hours: f64,
    pub overtime_hours: f64,
    pub has_unresolved_conflicts: bool,
    pub entry_count: i32,
}

impl From<WeeklySummary> for GqlWeeklySummary {
    fn from(s: WeeklySummary) -> Self {
        Self {
            user_id: s.user_id,
            year: s.year,
            week: s.week as i32,
            total_hours: s.total_hours,
            target_hours: s.target_hours,
            overtime_hours: s.overtime_hours,
            has_unresolved_conflicts: s.has_unresolved_conflicts,
            entry_count: s.entry_count as i32,
        }
    }
}

#[derive(Default)]
pub struct WeeklySummaryQuery;

#[Object]
impl WeeklySummaryQuery {
    async fn weekly_summary(
        &self,
        context: &Context<'_>,
        user_id: String,
        year: Option<i32>,
        week: Option<u32>,
        target_hours: Option<f64>,
    ) -> GqlResult<GqlWeeklySummary> {
        let state = context.data_unchecked::<AppState>();
        let summary = state
            .weekly_summary
            .handle(ComputeWeeklySummary {
                user_id,
                year,
                week,
                target_hours,
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(summary.into())
    }
}
