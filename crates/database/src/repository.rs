use crate::DbError;
use chrono::NaiveDateTime;
use core_types::{ChildRecord, Coordinates, GeoJsonPoint, NewChild, PositionRecord, SRID_WGS84};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::FromRow;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Name of the database and schema the current connection resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DatabaseIdentity {
    pub database: String,
    pub schema: Option<String>,
}

/// Database-specific roster row; `geom` arrives as GeoJSON from `ST_AsGeoJSON`.
#[derive(Debug, Clone, FromRow)]
struct DbChild {
    id: i64,
    user_name: String,
    user_function: String,
    geom: Json<GeoJsonPoint>,
    created_at: NaiveDateTime,
}

impl From<DbChild> for ChildRecord {
    fn from(row: DbChild) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            user_function: row.user_function,
            geom: row.geom.0,
            created_at: row.created_at,
        }
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Appends a point to the position stream and returns its new id.
    /// `created_at` is taken from the store's clock.
    pub async fn insert_position(&self, coords: &Coordinates) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO user_positions (geom, created_at)
            VALUES (ST_SetSRID(ST_MakePoint($1, $2), $3), NOW())
            RETURNING id::bigint
            "#,
        )
        .bind(coords.lon)
        .bind(coords.lat)
        .bind(SRID_WGS84)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(id, lat = coords.lat, lon = coords.lon, "Position stored.");
        Ok(id)
    }

    /// Fetches the most recently created position, if any.
    pub async fn latest_position(&self) -> Result<Option<PositionRecord>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let record = sqlx::query_as::<_, PositionRecord>(
            r#"
            SELECT id::bigint AS id,
                   ST_Y(geom) AS lat,
                   ST_X(geom) AS lon,
                   created_at::timestamp AS created_at
            FROM user_positions
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut *conn)
        .await?;
        Ok(record)
    }

    /// Adds a named entry to the roster and returns its new id.
    pub async fn insert_child(&self, child: &NewChild) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (user_name, user_function, geom, created_at)
            VALUES ($1, $2, ST_SetSRID(ST_MakePoint($3, $4), $5), NOW())
            RETURNING id::bigint
            "#,
        )
        .bind(&child.user_name)
        .bind(&child.user_function)
        .bind(child.lon)
        .bind(child.lat)
        .bind(SRID_WGS84)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(id, user_name = %child.user_name, "Roster entry stored.");
        Ok(id)
    }

    /// Fetches the whole roster, newest first. Ties on `created_at` go to the higher id.
    pub async fn list_children(&self) -> Result<Vec<ChildRecord>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, DbChild>(
            r#"
            SELECT id::bigint AS id,
                   user_name,
                   user_function,
                   ST_AsGeoJSON(geom)::json AS geom,
                   created_at::timestamp AS created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(ChildRecord::from).collect())
    }

    /// The store's `version()` string.
    pub async fn server_version(&self) -> Result<String, DbError> {
        let mut conn = self.pool.acquire().await?;
        let version = sqlx::query_scalar::<_, String>("SELECT version()")
            .fetch_one(&mut *conn)
            .await?;
        Ok(version)
    }

    pub async fn current_database(&self) -> Result<DatabaseIdentity, DbError> {
        let mut conn = self.pool.acquire().await?;
        let identity = sqlx::query_as::<_, DatabaseIdentity>(
            "SELECT current_database()::text AS database, current_schema()::text AS schema",
        )
        .fetch_one(&mut *conn)
        .await?;
        Ok(identity)
    }
}
