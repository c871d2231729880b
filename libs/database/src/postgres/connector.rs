use sqlx::{Connection, PgConnection};
use tracing::{debug, warn};

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Open a single connection, bounded by the configured connect timeout.
///
/// The caller owns the connection for the duration of one operation and
/// should hand it back to [`close`] afterwards.
pub async fn connect(config: &PostgresConfig) -> DatabaseResult<PgConnection> {
    let options = config.connect_options()?;

    let conn = tokio::time::timeout(config.connect_timeout(), PgConnection::connect_with(&options))
        .await
        .map_err(|_| {
            DatabaseError::ConnectionFailed(format!(
                "timed out after {}s",
                config.connect_timeout_secs
            ))
        })??;

    debug!("PostgreSQL connection opened");
    Ok(conn)
}

/// Close a connection, logging instead of failing: the operation that used it
/// has already produced its result.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Error closing PostgreSQL connection");
    } else {
        debug!("PostgreSQL connection closed");
    }
}
