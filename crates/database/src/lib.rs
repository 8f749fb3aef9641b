//! # Geotrack Database Crate
//!
//! This crate is the persistence adapter in front of a PostgreSQL store with
//! the PostGIS extension. It owns every SQL statement the service runs.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Callers see records from `core-types`; the spatial encoding
//!   (`ST_MakePoint` in longitude/latitude order, SRID 4326, `ST_X`/`ST_Y`,
//!   `ST_AsGeoJSON`) stays in here.
//! - **Acquire, use, release:** Each repository operation checks out exactly one
//!   connection from the pool and hands it back on every exit path, error paths
//!   included. Writes run in a transaction that is committed before returning.
//! - **No retries:** A failed checkout or statement surfaces as `DbError` to the caller.
//!
//! ## Public API
//!
//! - `connect`: builds the lazily connecting `PgPool`.
//! - `DbRepository`: the data access methods (`insert_position`, `list_children`, ...).
//! - `SCHEMA_SQL`: the reference DDL for both tables.
//! - `DbError`: the error type returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

/// Reference DDL for `user_positions` and `users`. Idempotent.
pub const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{DatabaseIdentity, DbRepository};
