//! Chatbot Domain Library
//!
//! Retrieval-augmented chat over relational data: rows are read from
//! PostgreSQL, cleaned, rendered to text, embedded and stored in Qdrant. At
//! question time the nearest rows become the context for a chat completion.
//!
//! # Architecture
//!
//! ```text
//!                 ┌────────────────┐
//!                 │ ChatbotService │  ← used by the HTTP handlers
//!                 └───────┬────────┘
//!            ┌────────────┴────────────┐
//!   ┌────────▼────────┐       ┌────────▼────────┐
//!   │  DataProcessor  │       │  SearchService  │
//!   └────────┬────────┘       └────────┬────────┘
//!            │                         │
//!   RelationalSource            EmbeddingProvider
//!   EmbeddingProvider           VectorRepository
//!   VectorRepository
//! ```
//!
//! The three traits are the seams: production wiring injects the concrete
//! clients as `Arc<dyn Trait>`, tests inject mocks or in-memory fakes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use core_config::FromEnv;
//! use database::postgres::PostgresConfig;
//! use domain_chatbot::{
//!     ChatbotService, CollectionSettings, OpenAIProvider, PostgresSource, QdrantConfig,
//!     QdrantRepository, QueryAuthorizer,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ChatbotService::new(
//!     Arc::new(PostgresSource::new(PostgresConfig::from_env()?)),
//!     Arc::new(OpenAIProvider::from_env()?),
//!     Arc::new(QdrantRepository::new(QdrantConfig::from_env()?)?),
//!     CollectionSettings::from_env()?,
//!     QueryAuthorizer::from_env(),
//! );
//! let router = domain_chatbot::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod config;
pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod processor;
pub mod qdrant;
pub mod repository;
pub mod search;
pub mod service;
pub mod source;
pub mod trusted;

// Re-export commonly used types
pub use config::CollectionSettings;
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{ChatbotError, ChatbotResult};
pub use handlers::ChatbotApiDoc;
pub use models::{
    ChatReply, CollectionDetails, ColumnMeta, Point, PointPayload, ScoredPoint, SourceRef,
    StoredPoint, TabularData, TrainOutcome,
};
pub use processor::DataProcessor;
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use search::SearchService;
pub use service::ChatbotService;
pub use source::{PostgresSource, RelationalSource};
pub use trusted::{QueryAuthorizer, TRUSTED_QUERY_HEADER, TrustedQuery};
