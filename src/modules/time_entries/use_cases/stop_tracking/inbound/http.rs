use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_entries::use_cases::stop_tracking::command::StopTracking;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StopTrackingBody {
    pub user_id: String,
    pub end_time: i64,
    #[serde(default)]
    pub expected_version: Option<i64>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<StopTrackingBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = StopTracking {
        user_id: body.user_id,
        end_time: body.end_time,
        expected_version: body.expected_version,
    };

    match state.stop_tracking.handle(command).await {
        Ok(stopped) => (StatusCode::OK, Json(TimeEntryView::from(stopped))).into_response(),
        Err(e) => error_response(e),
    }
}
