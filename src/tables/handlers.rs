use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{CreateTableRequest, TableResponse};
use super::repo;
use crate::{auth::AdminUser, error::ApiError, restaurants, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/tables", get(list_tables))
        .route("/tables/:id", get(get_table))
        .route("/tables/restaurant/:restaurant_id", get(list_by_restaurant))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/tables", post(create_table))
        .route("/tables/:id", delete(delete_table))
}

#[instrument(skip(state))]
pub async fn list_tables(
    State(state): State<AppState>,
) -> Result<Json<Vec<TableResponse>>, ApiError> {
    let rows = repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TableResponse>, ApiError> {
    let table = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("table".into()))?;
    Ok(Json(table.into()))
}

#[instrument(skip(state))]
pub async fn list_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<Vec<TableResponse>>, ApiError> {
    let rows = repo::list_by_restaurant(&state.db, restaurant_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_table(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<TableResponse>), ApiError> {
    if payload.capacity < 1 {
        warn!(capacity = payload.capacity, "invalid table capacity");
        return Err(ApiError::Validation("Capacity must be positive".into()));
    }

    if restaurants::repo::find_by_id(&state.db, payload.restaurant_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("restaurant".into()));
    }

    let table = repo::create(
        &state.db,
        payload.restaurant_id,
        payload.table_number,
        payload.capacity,
    )
    .await?;

    info!(table_id = %table.id, admin_id = %admin.id, "table created");
    Ok((StatusCode::CREATED, Json(table.into())))
}

#[instrument(skip(state))]
pub async fn delete_table(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = repo::delete_by_id(&state.db, id).await?;
    info!(table_id = %id, admin_id = %admin.id, deleted, "table delete");
    Ok(StatusCode::NO_CONTENT)
}
