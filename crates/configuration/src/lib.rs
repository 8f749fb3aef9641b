//! # Geotrack Configuration Crate
//!
//! Resolves everything the service needs at process start: where to listen,
//! which PostgreSQL/PostGIS store to talk to, and how large the connection
//! pool may grow. Values come from built-in defaults, an optional
//! `config.toml`, and the process environment (after a `.env` file, if any,
//! has been loaded), in increasing order of precedence.

use crate::error::ConfigError;
use crate::settings::Settings;

// Declare the modules that make up this crate.
pub mod error;
pub mod redact;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use redact::{redact_connection_url, PASSWORD_MASK};
pub use settings::DatabaseSettings;
pub use telemetry::init_tracing;

/// Loads the application configuration from `.env`, `config.toml` and the environment.
///
/// This function is the primary entry point for this crate. Both files are
/// optional; the environment always wins.
pub fn load_settings() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    let builder = settings::with_defaults(config::Config::builder())?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    Ok(settings)
}
