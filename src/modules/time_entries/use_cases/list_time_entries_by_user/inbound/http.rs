use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::ListTimeEntries;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListTimeEntriesParams {
    pub user_id: String,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub include_deleted: Option<bool>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub sort_desc: Option<bool>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListTimeEntriesParams>,
) -> impl IntoResponse {
    let query = ListTimeEntries {
        user_id: params.user_id,
        from: params.from,
        to: params.to,
        include_deleted: params.include_deleted.unwrap_or(false),
    };

    match state.queries.list(query).await {
        Ok(mut entries) => {
            if params.sort_desc.unwrap_or(true) {
                entries.reverse();
            }
            let page: Vec<TimeEntryView> = entries
                .into_iter()
                .skip(params.offset.unwrap_or(0) as usize)
                .take(params.limit.unwrap_or(20) as usize)
                .map(TimeEntryView::from)
                .collect();
            Json(page).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct GetTimeEntryParams {
    pub time_entry_id: String,
}

pub async fn get_one(
    State(state): State<AppState>,
    Query(params): Query<GetTimeEntryParams>,
) -> impl IntoResponse {
    match state.queries.get(&params.time_entry_id).await {
        Ok(Some(loaded)) => Json(TimeEntryView::from(loaded)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => error_response(e),
    }
}
