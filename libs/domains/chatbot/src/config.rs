use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Target collection and processing limits shared by ingestion and search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSettings {
    pub name: String,
    pub vector_size: u64,
    pub search_limit: u64,
    pub upsert_batch_size: usize,
}

impl CollectionSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_vector_size(mut self, size: u64) -> Self {
        self.vector_size = size;
        self
    }

    pub fn with_search_limit(mut self, limit: u64) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_upsert_batch_size(mut self, size: usize) -> Self {
        self.upsert_batch_size = size;
        self
    }
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            name: "chatbot_data".to_string(),
            vector_size: 1536,
            search_limit: 5,
            upsert_batch_size: 100,
        }
    }
}

/// Environment variables:
/// - `COLLECTION_NAME` (default: chatbot_data)
/// - `VECTOR_SIZE` (default: 1536)
/// - `SEARCH_LIMIT` (default: 5)
/// - `UPSERT_BATCH_SIZE` (default: 100)
impl FromEnv for CollectionSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let settings = Self {
            name: env_or_default("COLLECTION_NAME", &defaults.name),
            vector_size: env_parse_or("VECTOR_SIZE", defaults.vector_size)?,
            search_limit: env_parse_or("SEARCH_LIMIT", defaults.search_limit)?,
            upsert_batch_size: env_parse_or("UPSERT_BATCH_SIZE", defaults.upsert_batch_size)?,
        };

        if settings.vector_size == 0 {
            return Err(must_be_positive("VECTOR_SIZE"));
        }
        if settings.upsert_batch_size == 0 {
            return Err(must_be_positive("UPSERT_BATCH_SIZE"));
        }

        Ok(settings)
    }
}

fn must_be_positive(key: &str) -> ConfigError {
    ConfigError::ParseError {
        key: key.to_string(),
        details: "must be greater than zero".to_string(),
    }
}
