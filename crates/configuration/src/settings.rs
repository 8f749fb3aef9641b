use crate::error::ConfigError;
use crate::redact::redact_connection_url;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// The root configuration structure for the service.
///
/// Field names mirror the environment variables they are read from
/// (`DATABASE_URL`, `PGHOST`, ...), lower-cased by the `config` crate.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_address: String,

    /// Single connection URL. Supersedes the discrete `PG*` settings when present.
    pub database_url: Option<String>,
    pub pghost: Option<String>,
    pub pgport: u16,
    pub pguser: Option<String>,
    pub pgpassword: Option<String>,
    pub pgdatabase: Option<String>,

    /// Upper bound on pooled connections.
    pub db_max_connections: u32,
    /// How long a request waits for a connection before failing.
    pub db_acquire_timeout_secs: u64,
}

/// The resolved connection target handed to the persistence layer.
#[derive(Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

// The raw URL carries the password, so Debug only ever shows the redacted form.
impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// The connection URL with its password replaced by the mask.
    pub fn redacted_url(&self) -> String {
        redact_connection_url(&self.url)
    }
}

/// Seeds a builder with every default so that a bare environment still deserializes.
pub(crate) fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
        .set_default("pgport", i64::from(DEFAULT_PG_PORT))?
        .set_default("db_max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
        .set_default("db_acquire_timeout_secs", DEFAULT_ACQUIRE_TIMEOUT_SECS as i64)?)
}

impl Settings {
    /// Parses `bind_address` into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))
    }

    /// Resolves the database target.
    ///
    /// `DATABASE_URL` wins when it is set and non-empty. Otherwise a URL is
    /// composed from `PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD` and `PGDATABASE`.
    pub fn database(&self) -> Result<DatabaseSettings, ConfigError> {
        let url = match non_empty(&self.database_url) {
            Some(url) => {
                Url::parse(url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
                url.to_string()
            }
            None => self.compose_url()?,
        };

        Ok(DatabaseSettings {
            url,
            max_connections: self.db_max_connections.max(1),
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
        })
    }

    fn compose_url(&self) -> Result<String, ConfigError> {
        let host = non_empty(&self.pghost).ok_or(ConfigError::MissingDatabase)?;
        let invalid = |what: &str| ConfigError::InvalidUrl(format!("cannot use {} in a connection URL", what));

        let mut url = Url::parse("postgres://localhost")
            .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        url.set_host(Some(host))
            .map_err(|e| ConfigError::InvalidUrl(format!("PGHOST: {}", e)))?;
        url.set_port(Some(self.pgport)).map_err(|_| invalid("PGPORT"))?;
        if let Some(user) = non_empty(&self.pguser) {
            url.set_username(user).map_err(|_| invalid("PGUSER"))?;
        }
        if let Some(password) = non_empty(&self.pgpassword) {
            url.set_password(Some(password)).map_err(|_| invalid("PGPASSWORD"))?;
        }
        if let Some(database) = non_empty(&self.pgdatabase) {
            url.path_segments_mut()
                .map_err(|_| invalid("PGDATABASE"))?
                .push(database);
        }
        Ok(url.into())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
