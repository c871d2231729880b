//! Shared application state.
//!
//! Holds the injected clients so that `/ready` can check the same
//! connections the chatbot routes use.

use std::sync::Arc;

use domain_chatbot::{RelationalSource, VectorRepository};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub source: Arc<dyn RelationalSource>,
    pub store: Arc<dyn VectorRepository>,
}
