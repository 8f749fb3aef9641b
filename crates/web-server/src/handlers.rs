use crate::{error::AppError, AppState};
use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use core_types::{ChildList, Coordinates, InsertedId, NewChild, PositionRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Version reported by `GET /api/info/api`. Part of the wire contract.
pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct DbInfo {
    pub status: String,
    pub database_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    pub status: String,
    pub api_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DbDebug {
    pub database: String,
    pub schema: Option<String>,
    pub connection_url: String,
}

/// # POST /api/coordinates
pub async fn add_coordinates(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(coords), _): WithRejection<Json<Coordinates>, AppError>,
) -> Result<Json<InsertedId>, AppError> {
    let id = state.db_repo.insert_position(&coords).await?;
    Ok(Json(id.into()))
}

/// # GET /api/coordinates
/// The newest position, or `null` while the stream is empty.
pub async fn get_latest_coordinates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<PositionRecord>>, AppError> {
    let record = state
        .db_repo
        .latest_position()
        .await
        .map_err(AppError::masked("Database query error"))?;
    Ok(Json(record))
}

/// # GET /api/coordinates/sara
/// Fixed sample record. Never touches the store.
pub async fn get_sample_coordinates() -> Json<PositionRecord> {
    Json(PositionRecord::sample())
}

/// # GET /api/info/db
pub async fn get_db_info(State(state): State<Arc<AppState>>) -> Result<Json<DbInfo>, AppError> {
    let database_version = state
        .db_repo
        .server_version()
        .await
        .map_err(AppError::masked("Database connection failed"))?;
    Ok(Json(DbInfo {
        status: "ok".to_string(),
        database_version,
    }))
}

/// # GET /api/info/api
pub async fn get_api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        status: "ok".to_string(),
        api_version: API_VERSION.to_string(),
    })
}

/// # GET /api/debug/db
pub async fn get_db_debug(State(state): State<Arc<AppState>>) -> Result<Json<DbDebug>, AppError> {
    let identity = state
        .db_repo
        .current_database()
        .await
        .map_err(AppError::masked("Internal Server Error"))?;
    Ok(Json(DbDebug {
        database: identity.database,
        schema: identity.schema,
        connection_url: state.connection_url.clone(),
    }))
}

/// # POST /api/child/coordinates
pub async fn add_child_coordinates(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(child), _): WithRejection<Json<NewChild>, AppError>,
) -> Result<Json<InsertedId>, AppError> {
    let id = state.db_repo.insert_child(&child).await?;
    Ok(Json(id.into()))
}

/// # GET /api/child/coordinates
/// The whole roster, newest first.
pub async fn get_child_coordinates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChildList>, AppError> {
    let children = state.db_repo.list_children().await?;
    Ok(Json(children.into()))
}
