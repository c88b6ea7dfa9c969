use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_entries::use_cases::weekly_summary::handler::ComputeWeeklySummary;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct WeeklySummaryParams {
    pub user_id: String,
    pub year: Option<i32>,
    pub week: Option<u32>,
    pub target_hours: Option<f64>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<WeeklySummaryParams>,
) -> impl IntoResponse {
    let query = ComputeWeeklySummary {
        user_id: params.user_id,
        year: params.year,
        week: params.week,
        target_hours: params.target_hours,
    };

    match state.weekly_summary.handle(query).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => error_response(e),
    }
}
