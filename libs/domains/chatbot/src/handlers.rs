use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
};
use axum_helpers::ErrorResponse;
use axum_helpers::extractors::Json as JsonBody;
use serde_json::{Value, json};
use utoipa::OpenApi;

use crate::error::{ChatbotError, ChatbotResult};
use crate::models::{
    ChatRequest, ChatResponse, ColumnsResponse, SourceRef, StoredPoint, TablesResponse,
    TrainRequest, TrainResponse, TrainSqlRequest, TrainSqlResponse,
};
use crate::service::{ChatbotService, CollectionReport, SampleReport};
use crate::trusted::TRUSTED_QUERY_HEADER;

pub const TAG: &str = "chatbot";

/// OpenAPI documentation for the chatbot API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tables,
        list_columns,
        train,
        train_sql,
        chat,
        collection_info,
        sample_data,
    ),
    components(schemas(
        TablesResponse, ColumnsResponse,
        TrainRequest, TrainResponse,
        TrainSqlRequest, TrainSqlResponse,
        ChatRequest, ChatResponse, SourceRef,
        CollectionReport, SampleReport, StoredPoint,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Train on relational data and chat over it")
    )
)]
pub struct ChatbotApiDoc;

/// Routes relative to the API root
pub fn router(service: ChatbotService) -> Router {
    Router::new()
        .route("/tables", get(list_tables))
        .route("/tables/{table_name}/columns", get(list_columns))
        .route("/train", post(train))
        .route("/train-sql", post(train_sql))
        .route("/chat", post(chat))
        .route("/debug/collection-info", get(collection_info))
        .route("/debug/sample-data", get(sample_data))
        .with_state(Arc::new(service))
}

/// List base tables in the relational database
#[utoipa::path(
    get,
    path = "/tables",
    tag = TAG,
    responses(
        (status = 200, description = "Table names", body = TablesResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_tables(
    State(service): State<Arc<ChatbotService>>,
) -> ChatbotResult<Json<TablesResponse>> {
    let tables = service.list_tables().await?;
    Ok(Json(TablesResponse { tables }))
}

/// List column names of a table in ordinal order
#[utoipa::path(
    get,
    path = "/tables/{table_name}/columns",
    tag = TAG,
    params(("table_name" = String, Path, description = "Table name")),
    responses(
        (status = 200, description = "Column names", body = ColumnsResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_columns(
    State(service): State<Arc<ChatbotService>>,
    Path(table_name): Path<String>,
) -> ChatbotResult<Json<ColumnsResponse>> {
    let columns = service.list_column_names(&table_name).await?;
    Ok(Json(ColumnsResponse { columns }))
}

/// Embed and store every row of a table
#[utoipa::path(
    post,
    path = "/train",
    tag = TAG,
    request_body = TrainRequest,
    responses(
        (status = 200, description = "Training finished", body = TrainResponse),
        (status = 400, description = "Table does not exist", body = ErrorResponse),
        (status = 422, description = "Body is not a valid request", body = ErrorResponse),
        (status = 500, description = "Training failed", body = ErrorResponse)
    )
)]
pub async fn train(
    State(service): State<Arc<ChatbotService>>,
    JsonBody(request): JsonBody<TrainRequest>,
) -> ChatbotResult<Json<TrainResponse>> {
    let table = request.table_name;
    let outcome = service.train_table(&table).await?;

    let message = if outcome.processed == 0 {
        format!("Warning: No valid data found in {}", table)
    } else {
        format!("Successfully trained {} rows from {}", outcome.processed, table)
    };

    Ok(Json(TrainResponse {
        message,
        processed_rows: outcome.processed,
    }))
}

/// Embed and store every row returned by a trusted SQL query
#[utoipa::path(
    post,
    path = "/train-sql",
    tag = TAG,
    request_body = TrainSqlRequest,
    params(
        ("x-trusted-query-token" = Option<String>, Header, description = "Token authorizing arbitrary SQL")
    ),
    responses(
        (status = 200, description = "Training finished", body = TrainSqlResponse),
        (status = 400, description = "Missing field or query failed", body = ErrorResponse),
        (status = 401, description = "Token header missing", body = ErrorResponse),
        (status = 403, description = "Token rejected or capability disabled", body = ErrorResponse),
        (status = 422, description = "Body is not a valid request", body = ErrorResponse),
        (status = 500, description = "Training failed", body = ErrorResponse)
    )
)]
pub async fn train_sql(
    State(service): State<Arc<ChatbotService>>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<TrainSqlRequest>,
) -> ChatbotResult<Json<TrainSqlResponse>> {
    let token = headers.get(TRUSTED_QUERY_HEADER).map(|v| v.as_bytes());

    let outcome = service
        .train_sql(
            request.sql_query.as_deref(),
            request.source_name.as_deref(),
            token,
        )
        .await?;

    let message = if outcome.processed == 0 {
        "Warning: No valid data found from SQL query".to_string()
    } else {
        format!(
            "Successfully trained {} data points from {}",
            outcome.processed,
            request.source_name.as_deref().unwrap_or_default()
        )
    };

    Ok(Json(TrainSqlResponse {
        message,
        count: outcome.processed,
    }))
}

/// Answer a question from the most similar trained rows
#[utoipa::path(
    post,
    path = "/chat",
    tag = TAG,
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer with sources", body = ChatResponse),
        (status = 422, description = "Body is not a valid request", body = ErrorResponse),
        (status = 500, description = "Embedding, search or completion failed", body = ErrorResponse)
    )
)]
pub async fn chat(
    State(service): State<Arc<ChatbotService>>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> ChatbotResult<Json<ChatResponse>> {
    let reply = service.chat(&request.message).await?;
    Ok(Json(reply.into()))
}

/// Collection parameters and point count. Errors are reported in the body.
#[utoipa::path(
    get,
    path = "/debug/collection-info",
    tag = TAG,
    responses(
        (status = 200, description = "Collection state or `{error}`", body = CollectionReport)
    )
)]
pub async fn collection_info(State(service): State<Arc<ChatbotService>>) -> Json<Value> {
    match service.collection_report().await {
        Ok(report) => Json(json!(report)),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}

/// First three stored points. Errors are reported in the body.
#[utoipa::path(
    get,
    path = "/debug/sample-data",
    tag = TAG,
    responses(
        (status = 200, description = "Sample points or `{error}`", body = SampleReport)
    )
)]
pub async fn sample_data(State(service): State<Arc<ChatbotService>>) -> Json<Value> {
    match service.sample_report().await {
        Ok(report) => Json(json!(report)),
        Err(ChatbotError::CollectionNotFound(_)) => Json(json!({ "error": "Collection not found" })),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}
