use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    self, CountPointsBuilder, CreateCollectionBuilder, Distance, PointId, PointStruct,
    ScrollPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue,
    VectorParamsBuilder, point_id::PointIdOptions, value::Kind, vectors_config,
};
use serde_json::{Map, Number, Value as JsonValue};
use tracing::{debug, info, instrument};

use super::QdrantConfig;
use crate::error::{ChatbotError, ChatbotResult};
use crate::models::{CollectionDetails, Point, ScoredPoint, StoredPoint};
use crate::repository::VectorRepository;

/// Qdrant-backed implementation of VectorRepository
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub fn new(config: QdrantConfig) -> ChatbotResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| ChatbotError::VectorStore(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn to_point_struct(point: Point) -> ChatbotResult<PointStruct> {
        let payload = match serde_json::to_value(&point.payload)? {
            JsonValue::Object(map) => map
                .into_iter()
                .map(|(key, value)| (key, json_to_qdrant_value(value)))
                .collect::<HashMap<_, _>>(),
            other => {
                return Err(ChatbotError::Internal(format!(
                    "Payload must serialize to an object, got {}",
                    other
                )));
            }
        };

        Ok(PointStruct::new(
            PointId::from(point.id.to_string()),
            point.vector,
            payload,
        ))
    }

    fn not_found(collection: &str) -> ChatbotError {
        ChatbotError::CollectionNotFound(collection.to_string())
    }
}

fn json_to_qdrant_value(value: JsonValue) -> QdrantValue {
    let kind = match value {
        JsonValue::Null => Kind::NullValue(0),
        JsonValue::Bool(b) => Kind::BoolValue(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Kind::IntegerValue(i),
            None => Kind::DoubleValue(n.as_f64().unwrap_or_default()),
        },
        JsonValue::String(s) => Kind::StringValue(s),
        JsonValue::Array(items) => Kind::ListValue(qdrant::ListValue {
            values: items.into_iter().map(json_to_qdrant_value).collect(),
        }),
        JsonValue::Object(map) => Kind::StructValue(qdrant::Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant_value(v)))
                .collect(),
        }),
    };

    QdrantValue { kind: Some(kind) }
}

fn qdrant_value_to_json(value: QdrantValue) -> JsonValue {
    match value.kind {
        None | Some(Kind::NullValue(_)) => JsonValue::Null,
        Some(Kind::BoolValue(b)) => JsonValue::Bool(b),
        Some(Kind::IntegerValue(i)) => JsonValue::Number(i.into()),
        Some(Kind::DoubleValue(f)) => Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Some(Kind::StringValue(s)) => JsonValue::String(s),
        Some(Kind::ListValue(list)) => {
            JsonValue::Array(list.values.into_iter().map(qdrant_value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => JsonValue::Object(payload_to_json(s.fields)),
    }
}

fn payload_to_json(payload: HashMap<String, QdrantValue>) -> Map<String, JsonValue> {
    payload
        .into_iter()
        .map(|(key, value)| (key, qdrant_value_to_json(value)))
        .collect()
}

fn point_id_to_json(id: Option<PointId>) -> JsonValue {
    match id.and_then(|id| id.point_id_options) {
        Some(PointIdOptions::Uuid(uuid)) => JsonValue::String(uuid),
        Some(PointIdOptions::Num(num)) => JsonValue::Number(num.into()),
        None => JsonValue::Null,
    }
}

/// Size and distance of the collection's (first) dense vector
fn vector_params(config: Option<&qdrant::CollectionConfig>) -> (u64, Distance) {
    let params = config
        .and_then(|c| c.params.as_ref())
        .and_then(|p| p.vectors_config.as_ref())
        .and_then(|vc| vc.config.as_ref());

    match params {
        Some(vectors_config::Config::Params(p)) => (p.size, p.distance()),
        Some(vectors_config::Config::ParamsMap(map)) => map
            .map
            .values()
            .next()
            .map(|p| (p.size, p.distance()))
            .unwrap_or((0, Distance::UnknownDistance)),
        None => (0, Distance::UnknownDistance),
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    async fn collection_exists(&self, collection: &str) -> ChatbotResult<bool> {
        Ok(self.client.collection_exists(collection).await?)
    }

    #[instrument(skip(self))]
    async fn ensure_collection(&self, collection: &str, dimension: u64) -> ChatbotResult<()> {
        if self.collection_exists(collection).await? {
            debug!("Collection already exists");
            return Ok(());
        }

        let builder = CreateCollectionBuilder::new(collection)
            .vectors_config(VectorParamsBuilder::new(dimension, Distance::Cosine));

        if let Err(e) = self.client.create_collection(builder).await {
            // A concurrent creator may have won the race
            if !self.collection_exists(collection).await? {
                return Err(e.into());
            }
            debug!("Collection created concurrently");
        } else {
            info!("Created collection");
        }

        Ok(())
    }

    #[instrument(skip(self, points), fields(count = points.len()))]
    async fn upsert(&self, collection: &str, points: Vec<Point>) -> ChatbotResult<()> {
        if points.is_empty() {
            return Ok(());
        }

        let points = points
            .into_iter()
            .map(Self::to_point_struct)
            .collect::<ChatbotResult<Vec<_>>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await?;

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> ChatbotResult<Vec<ScoredPoint>> {
        if !self.collection_exists(collection).await? {
            return Err(Self::not_found(collection));
        }

        let response = self
            .client
            .search_points(SearchPointsBuilder::new(collection, vector, limit).with_payload(true))
            .await?;

        Ok(response
            .result
            .into_iter()
            .map(|point| ScoredPoint {
                score: point.score,
                payload: JsonValue::Object(payload_to_json(point.payload)),
            })
            .collect())
    }

    async fn list_collections(&self) -> ChatbotResult<Vec<String>> {
        let response = self.client.list_collections().await?;
        Ok(response.collections.into_iter().map(|c| c.name).collect())
    }

    async fn collection_details(
        &self,
        collection: &str,
    ) -> ChatbotResult<Option<CollectionDetails>> {
        if !self.collection_exists(collection).await? {
            return Ok(None);
        }

        let info = self
            .client
            .collection_info(collection)
            .await?
            .result
            .ok_or_else(|| ChatbotError::VectorStore("Collection info missing result".to_string()))?;

        let (vector_size, distance) = vector_params(info.config.as_ref());

        let points_count = self
            .client
            .count(CountPointsBuilder::new(collection).exact(true))
            .await?
            .result
            .map(|r| r.count)
            .unwrap_or_default();

        Ok(Some(CollectionDetails {
            name: collection.to_string(),
            points_count,
            vector_size,
            distance: distance.as_str_name().to_string(),
        }))
    }

    async fn sample(&self, collection: &str, limit: u32) -> ChatbotResult<Vec<StoredPoint>> {
        if !self.collection_exists(collection).await? {
            return Err(Self::not_found(collection));
        }

        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(collection)
                    .limit(limit)
                    .with_payload(true),
            )
            .await?;

        Ok(response
            .result
            .into_iter()
            .map(|point| StoredPoint {
                id: point_id_to_json(point.id),
                payload: JsonValue::Object(payload_to_json(point.payload)),
            })
            .collect())
    }

    async fn health_check(&self) -> ChatbotResult<()> {
        self.client.health_check().await?;
        Ok(())
    }
}
