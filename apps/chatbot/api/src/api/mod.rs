//! API routes module

pub mod health;

use std::sync::Arc;

use axum::Router;
use domain_chatbot::{ChatbotService, EmbeddingProvider, handlers};

use crate::state::AppState;

/// All API routes.
/// Note: these are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState, embeddings: Arc<dyn EmbeddingProvider>) -> Router {
    let service = ChatbotService::new(
        state.source.clone(),
        embeddings,
        state.store.clone(),
        state.config.collection.clone(),
        state.config.authorizer.clone(),
    );

    handlers::router(service)
}

/// The /ready endpoint, probing PostgreSQL and Qdrant.
///
/// Has its state applied so it can be merged into the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
