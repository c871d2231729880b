use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Relational data =====

/// A result-set column and the type name the database reported for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ColumnMeta {
    pub name: String,
    pub data_type: String,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Rows read from a table or a trusted query.
///
/// Cells are already rendered as text; `None` is SQL NULL. Every row has one
/// cell per column, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularData {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// One cleaned row, ready to be turned into text and a payload
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub columns: Vec<ColumnMeta>,
    pub values: BTreeMap<String, String>,
}

impl RowRecord {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

// ===== Vector store =====

/// Where a batch of points came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Table(String),
    Query { source_name: String, sql: String },
}

impl Origin {
    pub fn label(&self) -> &str {
        match self {
            Origin::Table(name) => name,
            Origin::Query { source_name, .. } => source_name,
        }
    }
}

/// Metadata stored with every point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    pub columns: Vec<String>,
    pub data: BTreeMap<String, String>,
    pub text_content: String,
    pub row_index: usize,
}

impl PointPayload {
    pub fn new(origin: &Origin, record: RowRecord, text_content: String, row_index: usize) -> Self {
        let (table_name, source_name, sql_query) = match origin {
            Origin::Table(name) => (Some(name.clone()), None, None),
            Origin::Query { source_name, sql } => (None, Some(source_name.clone()), Some(sql.clone())),
        };

        Self {
            table_name,
            source_name,
            sql_query,
            columns: record.column_names(),
            data: record.values,
            text_content,
            row_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

/// A search hit. The payload is kept as raw JSON so points written by other
/// tools can still be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoint {
    pub score: f32,
    pub payload: serde_json::Value,
}

/// A point as returned by a scroll
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoredPoint {
    #[schema(value_type = Object)]
    pub id: serde_json::Value,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
}

/// Collection parameters as reported by the vector store
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDetails {
    pub name: String,
    pub points_count: u64,
    pub vector_size: u64,
    pub distance: String,
}

// ===== Results =====

/// Counts from one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainOutcome {
    pub processed: usize,
    pub skipped: usize,
}

/// A retrieved row backing a chat answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SourceRef {
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub sources: Vec<SourceRef>,
}

// ===== HTTP DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnsResponse {
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainRequest {
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainResponse {
    pub message: String,
    pub processed_rows: usize,
}

/// Both fields are optional on the wire so that a missing one is reported as a 400
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TrainSqlRequest {
    #[serde(default)]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainSqlResponse {
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub sources: Vec<SourceRef>,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            response: reply.response,
            sources: reply.sources,
        }
    }
}
