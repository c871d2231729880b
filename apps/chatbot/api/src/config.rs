use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_chatbot::{CollectionSettings, OpenAIConfig, QdrantConfig, QueryAuthorizer};

pub use core_config::Environment;

/// Application configuration, composed from each component's own env loader
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub openai: OpenAIConfig,
    pub qdrant: QdrantConfig,
    pub collection: CollectionSettings,
    pub authorizer: QueryAuthorizer,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = PostgresConfig::from_env()?;
        let openai = OpenAIConfig::from_env()?;
        let qdrant = QdrantConfig::from_env()?;
        let collection = CollectionSettings::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            database,
            openai,
            qdrant,
            collection,
            authorizer: QueryAuthorizer::from_env(),
            environment,
        })
    }
}
