use async_graphql::{Context, Object, Result as GqlResult};
use uuid::Uuid;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::inbound::graphql::GqlTimeEntry;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_entries::use_cases::start_tracking::command::StartTracking;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct StartTrackingMutation;

#[Object]
impl StartTrackingMutation {
    async fn start_tracking(
        &self,
        context: &Context<'_>,
        user_id: String,
        start_time: i64,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();

        let command = StartTracking {
            time_entry_id: Uuid::now_v7().to_string(),
            user_id,
            start_time,
        };

        let started = state
            .start_tracking
            .handle(command)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(TimeEntryView::from(started).into())
    }
}
