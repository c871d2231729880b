use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatbotError {
    /// Table name did not resolve to a base table
    #[error("Invalid table: Table {0} does not exist")]
    InvalidTable(String),

    #[error("{0}")]
    Validation(String),

    /// A trusted query failed inside the database
    #[error("SQL execution error: {0}")]
    QueryExecution(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ChatbotResult<T> = Result<T, ChatbotError>;

impl From<database::DatabaseError> for ChatbotError {
    fn from(err: database::DatabaseError) -> Self {
        ChatbotError::Database(err.to_string())
    }
}

impl From<sqlx::Error> for ChatbotError {
    fn from(err: sqlx::Error) -> Self {
        ChatbotError::Database(err.to_string())
    }
}

impl From<qdrant_client::QdrantError> for ChatbotError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        ChatbotError::VectorStore(err.to_string())
    }
}

impl From<serde_json::Error> for ChatbotError {
    fn from(err: serde_json::Error) -> Self {
        ChatbotError::Internal(format!("JSON error: {}", err))
    }
}

impl From<core_config::ConfigError> for ChatbotError {
    fn from(err: core_config::ConfigError) -> Self {
        ChatbotError::Config(err.to_string())
    }
}

/// Convert ChatbotError to AppError for standardized HTTP error responses
impl From<ChatbotError> for AppError {
    fn from(err: ChatbotError) -> Self {
        let message = err.to_string();
        match err {
            ChatbotError::InvalidTable(_)
            | ChatbotError::Validation(_)
            | ChatbotError::QueryExecution(_) => AppError::BadRequest(message),
            ChatbotError::Unauthorized(_) => AppError::Unauthorized(message),
            ChatbotError::Forbidden(_) => AppError::Forbidden(message),
            ChatbotError::CollectionNotFound(_) => AppError::NotFound(message),
            ChatbotError::Database(_) => AppError::Database(message),
            ChatbotError::VectorStore(_)
            | ChatbotError::Embedding(_)
            | ChatbotError::Completion(_) => AppError::Upstream(message),
            ChatbotError::Config(_) | ChatbotError::Internal(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for ChatbotError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
