use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("No database configured: set DATABASE_URL or PGHOST (with PGPORT, PGUSER, PGPASSWORD, PGDATABASE)")]
    MissingDatabase,

    #[error("Invalid database connection settings: {0}")]
    InvalidUrl(String),

    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),
}
