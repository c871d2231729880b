use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::config::CollectionSettings;
use crate::embedding::EmbeddingProvider;
use crate::error::{ChatbotError, ChatbotResult};
use crate::models::{ChatReply, StoredPoint, TrainOutcome};
use crate::processor::DataProcessor;
use crate::repository::VectorRepository;
use crate::search::SearchService;
use crate::source::RelationalSource;
use crate::trusted::QueryAuthorizer;

const SAMPLE_SIZE: u32 = 3;

/// State of the configured collection as shown by the debug endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CollectionReport {
    Present {
        collection_exists: bool,
        collection_name: String,
        points_count: u64,
        vector_size: u64,
        distance: String,
    },
    Absent {
        collection_exists: bool,
        available_collections: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SampleReport {
    pub sample_count: usize,
    pub sample_data: Vec<StoredPoint>,
}

/// Everything the HTTP layer needs, wired from injected clients
pub struct ChatbotService {
    source: Arc<dyn RelationalSource>,
    store: Arc<dyn VectorRepository>,
    processor: DataProcessor,
    search: SearchService,
    authorizer: QueryAuthorizer,
    collection: String,
}

impl ChatbotService {
    pub fn new(
        source: Arc<dyn RelationalSource>,
        embeddings: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorRepository>,
        settings: CollectionSettings,
        authorizer: QueryAuthorizer,
    ) -> Self {
        Self {
            processor: DataProcessor::new(
                source.clone(),
                embeddings.clone(),
                store.clone(),
                settings.clone(),
            ),
            search: SearchService::new(embeddings, store.clone(), settings.clone()),
            collection: settings.name,
            source,
            store,
            authorizer,
        }
    }

    pub fn source(&self) -> &Arc<dyn RelationalSource> {
        &self.source
    }

    pub fn store(&self) -> &Arc<dyn VectorRepository> {
        &self.store
    }

    pub async fn list_tables(&self) -> ChatbotResult<Vec<String>> {
        self.source.list_tables().await
    }

    pub async fn list_column_names(&self, table: &str) -> ChatbotResult<Vec<String>> {
        let columns = self.source.list_columns(table).await?;
        Ok(columns.into_iter().map(|c| c.name).collect())
    }

    pub async fn train_table(&self, table: &str) -> ChatbotResult<TrainOutcome> {
        self.processor.train_table(table).await
    }

    /// Validate the request fields, check the caller's token, then train.
    ///
    /// Field validation runs first so malformed requests get a 400 regardless
    /// of the token.
    #[instrument(skip(self, sql_query, token))]
    pub async fn train_sql(
        &self,
        sql_query: Option<&str>,
        source_name: Option<&str>,
        token: Option<&[u8]>,
    ) -> ChatbotResult<TrainOutcome> {
        let sql_query = sql_query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ChatbotError::Validation("SQL query is required".to_string()))?;
        let source_name = source_name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ChatbotError::Validation("Source name is required".to_string()))?;

        let token = token
            .map(std::str::from_utf8)
            .transpose()
            .map_err(|_| ChatbotError::Forbidden("Invalid trusted query token".to_string()))?;

        let query = self.authorizer.authorize(token, sql_query)?;
        self.processor.train_query(&query, source_name).await
    }

    pub async fn chat(&self, message: &str) -> ChatbotResult<ChatReply> {
        self.search.respond(message).await
    }

    pub async fn collection_report(&self) -> ChatbotResult<CollectionReport> {
        match self.store.collection_details(&self.collection).await? {
            Some(details) => Ok(CollectionReport::Present {
                collection_exists: true,
                collection_name: details.name,
                points_count: details.points_count,
                vector_size: details.vector_size,
                distance: details.distance,
            }),
            None => Ok(CollectionReport::Absent {
                collection_exists: false,
                available_collections: self.store.list_collections().await?,
            }),
        }
    }

    /// First few stored points; `CollectionNotFound` before any training
    pub async fn sample_report(&self) -> ChatbotResult<SampleReport> {
        let sample_data = self.store.sample(&self.collection, SAMPLE_SIZE).await?;
        Ok(SampleReport {
            sample_count: sample_data.len(),
            sample_data,
        })
    }
}
