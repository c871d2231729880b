//! Readiness checks against the live backends

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// 200 when PostgreSQL and Qdrant both answer, 503 otherwise
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "postgres",
            Box::pin(async {
                state
                    .source
                    .ping()
                    .await
                    .map_err(|e| format!("Postgres ping failed: {}", e))
            }),
        ),
        (
            "qdrant",
            Box::pin(async {
                state
                    .store
                    .health_check()
                    .await
                    .map_err(|e| format!("Qdrant health check failed: {}", e))
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{Environment, app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use domain_chatbot::{
        ChatbotError, ChatbotResult, CollectionDetails, CollectionSettings, ColumnMeta,
        OpenAIConfig, Point, QdrantConfig, QueryAuthorizer, RelationalSource, ScoredPoint,
        StoredPoint, TabularData, TrustedQuery, VectorRepository,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::state::AppState;

    struct Source {
        up: bool,
    }

    #[async_trait]
    impl RelationalSource for Source {
        async fn list_tables(&self) -> ChatbotResult<Vec<String>> {
            Ok(vec![])
        }
        async fn list_columns(&self, _table: &str) -> ChatbotResult<Vec<ColumnMeta>> {
            Ok(vec![])
        }
        async fn fetch_table(&self, table: &str) -> ChatbotResult<TabularData> {
            Err(ChatbotError::InvalidTable(table.to_string()))
        }
        async fn fetch_query(&self, _query: &TrustedQuery) -> ChatbotResult<TabularData> {
            Ok(TabularData::default())
        }
        async fn ping(&self) -> ChatbotResult<()> {
            if self.up {
                Ok(())
            } else {
                Err(ChatbotError::Internal("connection refused".to_string()))
            }
        }
    }

    struct Store {
        up: bool,
    }

    #[async_trait]
    impl VectorRepository for Store {
        async fn collection_exists(&self, _collection: &str) -> ChatbotResult<bool> {
            Ok(false)
        }
        async fn ensure_collection(&self, _collection: &str, _dimension: u64) -> ChatbotResult<()> {
            Ok(())
        }
        async fn upsert(&self, _collection: &str, _points: Vec<Point>) -> ChatbotResult<()> {
            Ok(())
        }
        async fn search(
            &self,
            collection: &str,
            _vector: Vec<f32>,
            _limit: u64,
        ) -> ChatbotResult<Vec<ScoredPoint>> {
            Err(ChatbotError::CollectionNotFound(collection.to_string()))
        }
        async fn list_collections(&self) -> ChatbotResult<Vec<String>> {
            Ok(vec![])
        }
        async fn collection_details(
            &self,
            _collection: &str,
        ) -> ChatbotResult<Option<CollectionDetails>> {
            Ok(None)
        }
        async fn sample(&self, collection: &str, _limit: u32) -> ChatbotResult<Vec<StoredPoint>> {
            Err(ChatbotError::CollectionNotFound(collection.to_string()))
        }
        async fn health_check(&self) -> ChatbotResult<()> {
            if self.up {
                Ok(())
            } else {
                Err(ChatbotError::VectorStore("unavailable".to_string()))
            }
        }
    }

    fn state(postgres_up: bool, qdrant_up: bool) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                server: ServerConfig::default(),
                database: PostgresConfig::new("postgresql://localhost/test"),
                openai: OpenAIConfig::new("sk-test"),
                qdrant: QdrantConfig::default(),
                collection: CollectionSettings::new("test"),
                authorizer: QueryAuthorizer::disabled(),
                environment: Environment::Development,
            },
            source: Arc::new(Source { up: postgres_up }),
            store: Arc::new(Store { up: qdrant_up }),
        }
    }

    async fn ready(state: AppState) -> (StatusCode, Value) {
        let response = crate::api::ready_router(state)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_when_both_backends_answer() {
        let (status, body) = ready(state(true, true)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["postgres"], "connected");
        assert_eq!(body["qdrant"], "connected");
    }

    #[tokio::test]
    async fn test_not_ready_when_qdrant_is_down() {
        let (status, body) = ready(state(true, false)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["postgres"], "connected");
        assert_eq!(body["qdrant"], "disconnected");
    }
}
