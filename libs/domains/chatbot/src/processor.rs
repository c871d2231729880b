use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::cleaning::{clean_row, row_text};
use crate::config::CollectionSettings;
use crate::embedding::EmbeddingProvider;
use crate::error::{ChatbotError, ChatbotResult};
use crate::models::{Origin, Point, PointPayload, TabularData, TrainOutcome};
use crate::repository::VectorRepository;
use crate::source::RelationalSource;
use crate::trusted::TrustedQuery;

/// Turns relational rows into stored points: clean, render, embed, upsert.
///
/// Rows are embedded one at a time. A row whose embedding fails is counted as
/// skipped and the run continues. Upserts happen in batches after all rows are
/// embedded; batches already written stay written if a later one fails.
pub struct DataProcessor {
    source: Arc<dyn RelationalSource>,
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorRepository>,
    settings: CollectionSettings,
}

impl DataProcessor {
    pub fn new(
        source: Arc<dyn RelationalSource>,
        embeddings: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorRepository>,
        settings: CollectionSettings,
    ) -> Self {
        Self {
            source,
            embeddings,
            store,
            settings,
        }
    }

    /// Train every row of `table`
    #[instrument(skip(self))]
    pub async fn train_table(&self, table: &str) -> ChatbotResult<TrainOutcome> {
        let data = self.source.fetch_table(table).await?;
        self.ingest(data, Origin::Table(table.to_string())).await
    }

    /// Train every row returned by an authorized query, labelled `source_name`
    #[instrument(skip(self, query))]
    pub async fn train_query(
        &self,
        query: &TrustedQuery,
        source_name: &str,
    ) -> ChatbotResult<TrainOutcome> {
        let data = self.source.fetch_query(query).await?;
        let origin = Origin::Query {
            source_name: source_name.to_string(),
            sql: query.sql().to_string(),
        };
        self.ingest(data, origin).await
    }

    async fn ingest(&self, data: TabularData, origin: Origin) -> ChatbotResult<TrainOutcome> {
        self.store
            .ensure_collection(&self.settings.name, self.settings.vector_size)
            .await?;

        let mut points = Vec::with_capacity(data.rows.len());
        let mut skipped = 0;

        for (row_index, cells) in data.rows.iter().enumerate() {
            let record = clean_row(&data.columns, cells);
            let text = row_text(&record);
            if text.is_empty() {
                debug!(row_index, "Row has no text content, storing anyway");
            }

            match self.embed_row(&text).await {
                Ok(vector) => points.push(Point {
                    id: Uuid::new_v4(),
                    vector,
                    payload: PointPayload::new(&origin, record, text, row_index),
                }),
                Err(e) => {
                    warn!(row_index, error = %e, "Skipping row: embedding failed");
                    skipped += 1;
                }
            }
        }

        let processed = points.len();
        self.upsert_in_batches(points).await?;

        info!(processed, skipped, source = origin.label(), "Training finished");
        Ok(TrainOutcome { processed, skipped })
    }

    async fn embed_row(&self, text: &str) -> ChatbotResult<Vec<f32>> {
        let vector = self.embeddings.embed(text).await?;

        if vector.len() as u64 != self.settings.vector_size {
            return Err(ChatbotError::Embedding(format!(
                "expected {} dimensions, got {}",
                self.settings.vector_size,
                vector.len()
            )));
        }

        Ok(vector)
    }

    async fn upsert_in_batches(&self, mut points: Vec<Point>) -> ChatbotResult<()> {
        let batch_size = self.settings.upsert_batch_size.max(1);

        while !points.is_empty() {
            let rest = points.split_off(batch_size.min(points.len()));
            self.store.upsert(&self.settings.name, points).await?;
            points = rest;
        }

        Ok(())
    }
}
