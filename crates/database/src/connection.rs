use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;

/// Builds the connection pool for the PostGIS store.
///
/// The pool connects lazily: nothing touches the network here, so the server
/// starts (and keeps answering) while the store is down, and picks up again
/// as soon as it is reachable. Every checkout is bounded by the configured
/// acquire timeout.
///
/// Must be called from within a Tokio runtime.
pub fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let options = PgConnectOptions::from_str(&settings.url)
        .map_err(|e| DbError::ConnectionConfigError(e.to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_lazy_with(options);

    tracing::debug!(url = %settings.redacted_url(), "Database pool configured.");
    Ok(pool)
}
