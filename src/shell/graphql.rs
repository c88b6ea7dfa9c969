use async_graphql::{EmptySubscription, MergedObject, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Extension;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::inbound::graphql::ListTimeEntriesQuery;
use crate::modules::time_entries::use_cases::start_tracking::inbound::graphql::StartTrackingMutation;
use crate::modules::time_entries::use_cases::stop_tracking::inbound::graphql::StopTrackingMutation;
use crate::modules::time_entries::use_cases::weekly_summary::inbound::graphql::WeeklySummaryQuery;
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(ListTimeEntriesQuery, WeeklySummaryQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(StartTrackingMutation, StopTrackingMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

pub async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> axum::response::Html<String> {
    use async_graphql::http::GraphiQLSource;
    axum::response::Html(GraphiQLSource::build().endpoint("/gql").finish())
}
