use async_trait::async_trait;

use crate::error::ChatbotResult;
use crate::models::{CollectionDetails, Point, ScoredPoint, StoredPoint};

/// Storage and nearest-neighbour search over named point collections.
///
/// Collections always use cosine similarity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    async fn collection_exists(&self, collection: &str) -> ChatbotResult<bool>;

    /// Create `collection` with the given dimensionality unless it already exists
    async fn ensure_collection(&self, collection: &str, dimension: u64) -> ChatbotResult<()>;

    /// Insert or replace points, waiting until they are searchable
    async fn upsert(&self, collection: &str, points: Vec<Point>) -> ChatbotResult<()>;

    /// Best matches for `vector`, highest score first.
    ///
    /// Fails with `CollectionNotFound` when the collection does not exist.
    async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> ChatbotResult<Vec<ScoredPoint>>;

    async fn list_collections(&self) -> ChatbotResult<Vec<String>>;

    /// Parameters and exact point count, or `None` if the collection does not exist
    async fn collection_details(&self, collection: &str)
    -> ChatbotResult<Option<CollectionDetails>>;

    /// First `limit` points with payloads.
    ///
    /// Fails with `CollectionNotFound` when the collection does not exist.
    async fn sample(&self, collection: &str, limit: u32) -> ChatbotResult<Vec<StoredPoint>>;

    async fn health_check(&self) -> ChatbotResult<()>;
}
