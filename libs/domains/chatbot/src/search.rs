use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::CollectionSettings;
use crate::embedding::EmbeddingProvider;
use crate::error::{ChatbotError, ChatbotResult};
use crate::models::{ChatReply, ScoredPoint, SourceRef};
use crate::repository::VectorRepository;

pub const NO_DATA_MESSAGE: &str = "Sorry, no data has been trained yet. Please train data first.";
pub const NO_ANSWER_MESSAGE: &str = "Sorry, I couldn't find an answer to your question.";

/// Retrieval-grounded answers: embed the question, fetch the nearest rows,
/// and let the chat model answer from their text.
pub struct SearchService {
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorRepository>,
    settings: CollectionSettings,
}

impl SearchService {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorRepository>,
        settings: CollectionSettings,
    ) -> Self {
        Self {
            embeddings,
            store,
            settings,
        }
    }

    #[instrument(skip_all)]
    pub async fn respond(&self, query: &str) -> ChatbotResult<ChatReply> {
        let vector = self.embeddings.embed(query).await?;

        let hits = match self
            .store
            .search(&self.settings.name, vector, self.settings.search_limit)
            .await
        {
            Ok(hits) => hits,
            Err(ChatbotError::CollectionNotFound(_)) => {
                info!("Chat requested before any training");
                return Ok(ChatReply {
                    response: NO_DATA_MESSAGE.to_string(),
                    sources: Vec::new(),
                });
            }
            Err(e) => return Err(e),
        };

        debug!(hits = hits.len(), "Retrieved context");

        let context = hits
            .iter()
            .map(text_content)
            .collect::<Vec<_>>()
            .join("\n\n");

        if context.trim().is_empty() {
            return Ok(ChatReply {
                response: NO_ANSWER_MESSAGE.to_string(),
                sources: Vec::new(),
            });
        }

        let response = self.embeddings.complete(query, &context).await?;
        let sources = hits.into_iter().map(source_ref).collect();

        Ok(ChatReply { response, sources })
    }
}

fn text_content(hit: &ScoredPoint) -> &str {
    hit.payload
        .get("text_content")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// `source_name` wins over `table_name` when a payload has both
fn source_ref(hit: ScoredPoint) -> SourceRef {
    let label = |key: &str| hit.payload.get(key).and_then(Value::as_str).map(str::to_string);
    let source = label("source_name").or_else(|| label("table_name"));

    SourceRef {
        data: hit
            .payload
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default())),
        score: hit.score,
        source,
    }
}
