//! PostgreSQL connection settings, scoped connections and health checks.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{close, connect};
pub use health::check_health;

pub use sqlx::PgConnection;
