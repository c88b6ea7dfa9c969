use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_entries::use_cases::start_tracking::command::StartTracking;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartTrackingBody {
    pub user_id: String,
    pub start_time: i64,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<StartTrackingBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = StartTracking {
        time_entry_id: Uuid::now_v7().to_string(),
        user_id: body.user_id,
        start_time: body.start_time,
    };

    match state.start_tracking.handle(command).await {
        Ok(started) => (StatusCode::CREATED, Json(TimeEntryView::from(started))).into_response(),
        Err(e) => error_response(e),
    }
}
