use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::time_entries::use_cases::list_time_entries_by_user::inbound::graphql::GqlTimeEntry;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_entries::use_cases::stop_tracking::command::StopTracking;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct StopTrackingMutation;

#[Object]
impl StopTrackingMutation {
    async fn stop_tracking(
        &self,
        context: &Context<'_>,
        user_id: String,
        end_time: i64,
        expected_version: Option<i64>,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();

        let stopped = state
            .stop_tracking
            .handle(StopTracking {
                user_id,
                end_time,
                expected_version,
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(TimeEntryView::from(stopped).into())
    }
}
