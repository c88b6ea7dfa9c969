use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_entries::use_cases::update_time_entry::command::{
    TimeEntryPatch, UpdateTimeEntry,
};
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct UpdateTimeEntryBody {
    pub time_entry_id: String,
    pub expected_version: i64,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub is_manual_entry: Option<bool>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<UpdateTimeEntryBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = UpdateTimeEntry {
        time_entry_id: body.time_entry_id,
        expected_version: body.expected_version,
        patch: TimeEntryPatch {
            start_time: body.start_time,
            end_time: body.end_time,
            is_manual_entry: body.is_manual_entry,
        },
    };

    match state.update_time_entry.handle(command).await {
        Ok(updated) => Json(TimeEntryView::from(updated)).into_response(),
        Err(e) => error_response(e),
    }
}
