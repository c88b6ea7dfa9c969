use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::ListTimeEntries;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlTimeEntry {
    pub time_entry_id: String,
    pub user_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_ms: Option<i64>,
    pub is_manual_entry: bool,
    pub created_at: i64,
    pub modified_at: Option<i64>,
    pub sync_status: String,
    pub deleted_at: Option<i64>,
    pub conflict_of: Option<String>,
    pub version: i64,
}

impl From<TimeEntryView> for GqlTimeEntry {
    fn from(v: TimeEntryView) -> Self {
        Self {
            time_entry_id: v.time_entry_id,
            user_id: v.user_id,
            start_time: v.start_time,
            end_time: v.end_time,
            duration_ms: v.duration_ms,
            is_manual_entry: v.is_manual_entry,
            created_at: v.created_at,
            modified_at: v.modified_at,
            sync_status: v.sync_status.as_str().to_string(),
            deleted_at: v.deleted_at,
            conflict_of: v.conflict_of,
            version: v.version,
        }
    }
}

#[derive(Default)]
pub struct ListTimeEntriesQuery;

#[Object]
impl ListTimeEntriesQuery {
    #[allow(clippy::too_many_arguments)]
    async fn list_time_entries_by_user_id(
        &self,
        context: &Context<'_>,
        user_id: String,
        from: Option<i64>,
        to: Option<i64>,
        include_deleted: Option<bool>,
        offset: Option<i64>,
        limit: Option<i64>,
        sort_desc: Option<bool>,
    ) -> GqlResult<Vec<GqlTimeEntry>> {
        let state = context.data_unchecked::<AppState>();
        let query = ListTimeEntries {
            user_id,
            from,
            to,
            include_deleted: include_deleted.unwrap_or(false),
        };
        let mut list = state
            .queries
            .list(query)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        if sort_desc.unwrap_or(true) {
            list.reverse();
        }
        Ok(list
            .into_iter()
            .skip(offset.unwrap_or(0).max(0) as usize)
            .take(limit.unwrap_or(20).max(0) as usize)
            .map(|loaded| TimeEntryView::from(loaded).into())
            .collect())
    }

    async fn time_entry(
        &self,
        context: &Context<'_>,
        time_entry_id: String,
    ) -> GqlResult<Option<GqlTimeEntry>> {
        let state = context.data_unchecked::<AppState>();
        let loaded = state
            .queries
            .get(&time_entry_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(loaded.map(|loaded| TimeEntryView::from(loaded).into()))
    }
}
