use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_entries::use_cases::delete_time_entry::command::DeleteTimeEntry;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct DeleteTimeEntryBody {
    pub time_entry_id: String,
    pub expected_version: i64,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<DeleteTimeEntryBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = DeleteTimeEntry {
        time_entry_id: body.time_entry_id,
        expected_version: body.expected_version,
    };

    match state.delete_time_entry.handle(command).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
