use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::time_entries::use_cases::create_manual_entry::command::CreateManualEntry;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateManualEntryBody {
    pub user_id: String,
    pub start_time: i64,
    pub end_time: i64,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<CreateManualEntryBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = CreateManualEntry {
        time_entry_id: Uuid::now_v7().to_string(),
        user_id: body.user_id,
        start_time: body.start_time,
        end_time: body.end_time,
    };

    match state.create_manual_entry.handle(command).await {
        Ok(created) => (StatusCode::CREATED, Json(TimeEntryView::from(created))).into_response(),
        Err(e) => error_response(e),
    }
}
