use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::modules::time_entries::adapters::outbound::entry_store::StoreError;
use crate::modules::time_entries::use_cases::create_manual_entry::inbound::http as create_manual_http;
use crate::modules::time_entries::use_cases::decision::DecideError;
use crate::modules::time_entries::use_cases::delete_time_entry::inbound::http as delete_http;
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::inbound::http as list_http;
use crate::modules::time_entries::use_cases::start_tracking::inbound::http as start_http;
use crate::modules::time_entries::use_cases::stop_tracking::inbound::http as stop_http;
use crate::modules::time_entries::use_cases::sync_time_entries::inbound::http as sync_http;
use crate::modules::time_entries::use_cases::update_time_entry::inbound::http as update_http;
use crate::modules::time_entries::use_cases::weekly_summary::inbound::http as summary_http;
use crate::shell::graphql::{AppSchema, graphiql, graphql};
use crate::shell::state::AppState;

pub fn router(state: AppState, schema: AppSchema) -> Router {
    Router::new()
        .route("/start-tracking", post(start_http::handle))
        .route("/stop-tracking", post(stop_http::handle))
        .route("/create-manual-entry", post(create_manual_http::handle))
        .route("/update-time-entry", post(update_http::handle))
        .route("/delete-time-entry", post(delete_http::handle))
        .route("/list-time-entries", get(list_http::handle))
        .route("/get-time-entry", get(list_http::get_one))
        .route("/weekly-summary", get(summary_http::handle))
        .route("/sync-time-entries", post(sync_http::handle))
        .with_state(state)
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
}

pub fn status_for(error: &ApplicationError) -> StatusCode {
    match error {
        ApplicationError::Domain(e) if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationError::Domain(DecideError::NotFound(_)) => StatusCode::NOT_FOUND,
        ApplicationError::Domain(_) => StatusCode::CONFLICT,
        ApplicationError::Store(StoreError::VersionMismatch { .. }) => StatusCode::CONFLICT,
        ApplicationError::Store(StoreError::Timeout(_)) => StatusCode::SERVICE_UNAVAILABLE,
        ApplicationError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error body with the status the error class maps to.
pub fn error_response(error: ApplicationError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "request failed");
    }
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
