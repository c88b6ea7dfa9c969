use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use time_tracking::modules::time_entries::adapters::outbound::entry_store_in_memory::InMemoryTimeEntryStore;
use time_tracking::shared::core::clock::SystemClock;
use time_tracking::shell::config::AppConfig;
use time_tracking::shell::graphql::build_schema;
use time_tracking::shell::http::router;
use time_tracking::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    // In-memory store for now
    let store = Arc::new(InMemoryTimeEntryStore::new());
    let state = AppState::new(
        store,
        Arc::new(SystemClock),
        config.store_timeout,
        config.weekly_targets.clone(),
    );
    let schema = build_schema(state.clone());
    let app = router(state, schema);

    let addr: SocketAddr = config.bind_addr().parse()?;
    tracing::info!("HTTP endpoint: http://{}", addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
