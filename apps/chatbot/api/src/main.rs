use std::sync::Arc;
use std::time::Duration;

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_chatbot::{OpenAIProvider, PostgresSource, QdrantRepository};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        collection = %config.collection.name,
        trusted_sql = config.authorizer.is_enabled(),
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    // Clients are lazy: nothing is contacted until the first request or /ready
    let source = Arc::new(PostgresSource::new(config.database.clone()));
    let store = Arc::new(QdrantRepository::new(config.qdrant.clone())?);
    let embeddings = Arc::new(OpenAIProvider::new(config.openai.clone()));

    let state = AppState {
        config,
        source,
        store,
    };

    let api_routes = api::routes(&state, embeddings);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /health: liveness with app name/version
    // - /ready: PostgreSQL and Qdrant reachability
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting chatbot API with production-ready shutdown (30s timeout)");

    let server = state.config.server.clone();
    create_production_app(
        app,
        &server,
        Duration::from_secs(30),
        async move {
            // Connections are per request; dropping the clients is all that is left
            drop(state);
            info!("Clients released");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Chatbot API shutdown complete");
    Ok(())
}
