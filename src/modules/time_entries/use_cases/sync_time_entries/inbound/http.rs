use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_entries::use_cases::sync_time_entries::command::SyncTimeEntries;
use crate::modules::time_entries::use_cases::sync_time_entries::handler::{
    SyncOutcome, SyncResult,
};
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct SyncResultView {
    pub outcome: SyncOutcome,
    pub client_entry_id: String,
    pub time_entry_id: Option<String>,
    pub reason: Option<String>,
    pub stored: Option<TimeEntryView>,
    pub server_version: Option<TimeEntryView>,
}

impl From<SyncResult> for SyncResultView {
    fn from(r: SyncResult) -> Self {
        Self {
            outcome: r.outcome,
            client_entry_id: r.client_entry_id,
            time_entry_id: r.time_entry_id,
            reason: r.reason,
            stored: r.stored.map(TimeEntryView::from),
            server_version: r.server_version.map(TimeEntryView::from),
        }
    }
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<SyncTimeEntries>, JsonRejection>,
) -> impl IntoResponse {
    let Json(command) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let results: Vec<SyncResultView> = state
        .sync
        .handle(command)
        .await
        .into_iter()
        .map(SyncResultView::from)
        .collect();
    Json(results).into_response()
}
