use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::EmbeddingProvider;
use crate::error::{ChatbotError, ChatbotResult};

const SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer based on the provided context.";

/// OpenAI API configuration
#[derive(Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("base_url", &self.base_url)
            .field("embedding_model", &self.embedding_model)
            .field("chat_model", &self.chat_model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// Environment variables:
/// - `OPENAI_API_KEY` (required)
/// - `OPENAI_BASE_URL` (default: https://api.openai.com/v1)
/// - `OPENAI_EMBEDDING_MODEL` (default: text-embedding-ada-002)
/// - `OPENAI_CHAT_MODEL` (default: gpt-3.5-turbo)
/// - `OPENAI_TEMPERATURE` (default: 0.7)
impl FromEnv for OpenAIConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(env_required("OPENAI_API_KEY")?);

        Ok(Self {
            base_url: env_or_default("OPENAI_BASE_URL", &defaults.base_url),
            embedding_model: env_or_default("OPENAI_EMBEDDING_MODEL", &defaults.embedding_model),
            chat_model: env_or_default("OPENAI_CHAT_MODEL", &defaults.chat_model),
            temperature: env_parse_or("OPENAI_TEMPERATURE", defaults.temperature)?,
            api_key: defaults.api_key,
        })
    }
}

/// OpenAI embeddings and chat completions over HTTP
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> ChatbotResult<Self> {
        Ok(Self::new(OpenAIConfig::from_env()?))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, String>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("OpenAI API error ({}): {}", status, error_text));
        }

        response.json::<R>().await.map_err(|e| e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn chat_messages(query: &str, context: &str) -> Vec<ChatMessage<'static>> {
    vec![
        ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user",
            content: format!("Context: {}\n\nQuestion: {}", context, query),
        },
    ]
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    #[instrument(skip_all, fields(model = %self.config.embedding_model, chars = text.len()))]
    async fn embed(&self, text: &str) -> ChatbotResult<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let response: EmbeddingResponse = self
            .post("embeddings", &request)
            .await
            .map_err(ChatbotError::Embedding)?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ChatbotError::Embedding("No embedding returned".to_string()))?;

        debug!(dimension = embedding.len(), "Embedding received");
        Ok(embedding)
    }

    #[instrument(skip_all, fields(model = %self.config.chat_model))]
    async fn complete(&self, query: &str, context: &str) -> ChatbotResult<String> {
        let request = ChatCompletionRequest {
            model: &self.config.chat_model,
            messages: chat_messages(query, context),
            temperature: self.config.temperature,
        };

        let response: ChatCompletionResponse = self
            .post("chat/completions", &request)
            .await
            .map_err(ChatbotError::Completion)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatbotError::Completion("No completion returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenAIConfig::new("sk-test");
        assert_eq!(config.embedding_model, "text-embedding-ada-002");
        assert_eq!(config.chat_model, "gpt-3.5-turbo");
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_config_from_env_requires_key() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            let err = OpenAIConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("OPENAI_API_KEY"));
        });
    }

    #[test]
    fn test_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_BASE_URL", Some("http://localhost:9999/v1")),
                ("OPENAI_CHAT_MODEL", Some("gpt-4o-mini")),
                ("OPENAI_TEMPERATURE", Some("0.2")),
                ("OPENAI_EMBEDDING_MODEL", None),
            ],
            || {
                let config = OpenAIConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://localhost:9999/v1");
                assert_eq!(config.chat_model, "gpt-4o-mini");
                assert_eq!(config.embedding_model, "text-embedding-ada-002");
                assert!((config.temperature - 0.2).abs() < f32::EPSILON);
            },
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = OpenAIConfig::new("sk-very-secret");
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_base_url("http://x/v1/"));
        assert_eq!(provider.endpoint("embeddings"), "http://x/v1/embeddings");
    }

    #[test]
    fn test_chat_prompt_shape() {
        let messages = chat_messages("Who is Alice?", "name: Alice");
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].content, "Context: name: Alice\n\nQuestion: Who is Alice?");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_embedding_error() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_base_url("http://127.0.0.1:1"));
        let err = provider.embed("hello").await.unwrap_err();
        assert!(matches!(err, ChatbotError::Embedding(_)));
    }
}
