//! In-memory stand-ins for the three external seams

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use http_body_util::BodyExt;
use serde_json::{Value, json};

use domain_chatbot::{
    ChatbotError, ChatbotResult, CollectionDetails, ColumnMeta, EmbeddingProvider, Point,
    RelationalSource, ScoredPoint, StoredPoint, TabularData, TrustedQuery, VectorRepository,
};

pub const DIM: usize = 16;

/// Text containing this marker fails to embed
pub const POISON: &str = "FAIL_EMBED";

pub async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ===== Relational source =====

#[derive(Default)]
pub struct FakeSource {
    tables: HashMap<String, TabularData>,
    queries: HashMap<String, TabularData>,
}

impl FakeSource {
    pub fn with_table(mut self, name: &str, data: TabularData) -> Self {
        self.tables.insert(name.to_string(), data);
        self
    }

    pub fn with_query(mut self, sql: &str, data: TabularData) -> Self {
        self.queries.insert(sql.to_string(), data);
        self
    }
}

#[async_trait]
impl RelationalSource for FakeSource {
    async fn list_tables(&self) -> ChatbotResult<Vec<String>> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn list_columns(&self, table: &str) -> ChatbotResult<Vec<ColumnMeta>> {
        Ok(self
            .tables
            .get(table)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    async fn fetch_table(&self, table: &str) -> ChatbotResult<TabularData> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| ChatbotError::InvalidTable(table.to_string()))
    }

    async fn fetch_query(&self, query: &TrustedQuery) -> ChatbotResult<TabularData> {
        self.queries.get(query.sql()).cloned().ok_or_else(|| {
            ChatbotError::QueryExecution(format!("relation in `{}` does not exist", query.sql()))
        })
    }

    async fn ping(&self) -> ChatbotResult<()> {
        Ok(())
    }
}

// ===== Embeddings =====

/// Bag-of-words hashing embedder; the completion echoes its context
pub struct HashingEmbedder;

impl HashingEmbedder {
    fn bucket(token: &str) -> usize {
        token
            .bytes()
            .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619)) as usize
            % DIM
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> ChatbotResult<Vec<f32>> {
        if text.contains(POISON) {
            return Err(ChatbotError::Embedding("poisoned input".to_string()));
        }

        let mut vector = vec![0.0; DIM];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            vector[Self::bucket(&token.to_lowercase())] += 1.0;
        }
        Ok(vector)
    }

    async fn complete(&self, query: &str, context: &str) -> ChatbotResult<String> {
        Ok(format!("Q: {} | based on: {}", query, context))
    }
}

// ===== Vector store =====

#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, (u64, Vec<Point>)>>,
}

impl InMemoryStore {
    pub fn point_count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|(_, points)| points.len())
            .unwrap_or(0)
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm = |v: &[f32]| v.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm(a) * norm(b);
    if denom == 0.0 { 0.0 } else { dot / denom }
}

#[async_trait]
impl VectorRepository for InMemoryStore {
    async fn collection_exists(&self, collection: &str) -> ChatbotResult<bool> {
        Ok(self.collections.lock().unwrap().contains_key(collection))
    }

    async fn ensure_collection(&self, collection: &str, dimension: u64) -> ChatbotResult<()> {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_insert_with(|| (dimension, Vec::new()));
        Ok(())
    }

    async fn upsert(&self, collection: &str, points: Vec<Point>) -> ChatbotResult<()> {
        let mut collections = self.collections.lock().unwrap();
        let (dimension, stored) = collections
            .get_mut(collection)
            .ok_or_else(|| ChatbotError::CollectionNotFound(collection.to_string()))?;

        for point in points {
            if point.vector.len() as u64 != *dimension {
                return Err(ChatbotError::VectorStore("dimension mismatch".to_string()));
            }
            stored.retain(|p| p.id != point.id);
            stored.push(point);
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> ChatbotResult<Vec<ScoredPoint>> {
        let collections = self.collections.lock().unwrap();
        let (_, stored) = collections
            .get(collection)
            .ok_or_else(|| ChatbotError::CollectionNotFound(collection.to_string()))?;

        let mut hits: Vec<ScoredPoint> = stored
            .iter()
            .map(|p| ScoredPoint {
                score: cosine(&vector, &p.vector),
                payload: serde_json::to_value(&p.payload).unwrap(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn list_collections(&self) -> ChatbotResult<Vec<String>> {
        Ok(self.collections.lock().unwrap().keys().cloned().collect())
    }

    async fn collection_details(
        &self,
        collection: &str,
    ) -> ChatbotResult<Option<CollectionDetails>> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|(dimension, points)| CollectionDetails {
                name: collection.to_string(),
                points_count: points.len() as u64,
                vector_size: *dimension,
                distance: "Cosine".to_string(),
            }))
    }

    async fn sample(&self, collection: &str, limit: u32) -> ChatbotResult<Vec<StoredPoint>> {
        let collections = self.collections.lock().unwrap();
        let (_, stored) = collections
            .get(collection)
            .ok_or_else(|| ChatbotError::CollectionNotFound(collection.to_string()))?;

        Ok(stored
            .iter()
            .take(limit as usize)
            .map(|p| StoredPoint {
                id: json!(p.id.to_string()),
                payload: serde_json::to_value(&p.payload).unwrap(),
            })
            .collect())
    }

    async fn health_check(&self) -> ChatbotResult<()> {
        Ok(())
    }
}
