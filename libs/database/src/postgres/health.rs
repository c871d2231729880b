use tracing::debug;

use super::{PostgresConfig, close, connect};
use crate::common::DatabaseError;

/// Open a connection, run `SELECT 1` and close it again.
pub async fn check_health(config: &PostgresConfig) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let mut conn = connect(config)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&mut conn)
        .await;
    close(conn).await;

    result.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_health_unreachable_server() {
        let config = PostgresConfig::new("postgresql://nobody@127.0.0.1:1/none").with_connect_timeout(1);
        let err = check_health(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_check_health_against_container() {
        let db = test_utils::TestDatabase::new().await;
        let config = PostgresConfig::new(db.url());
        check_health(&config).await.unwrap();
    }
}
