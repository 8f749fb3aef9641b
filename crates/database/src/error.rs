use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    /// Any driver-level failure: unreachable store, timeout, SQL error, constraint violation.
    /// Displays the driver's own message unchanged.
    #[error("{0}")]
    QueryError(#[from] sqlx::Error),
}
