use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{CreateTimeSlotRequest, TimeSlotResponse};
use super::repo;
use crate::{auth::AdminUser, error::ApiError, state::AppState, tables};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/timeslots", get(list_time_slots))
        .route("/timeslots/:id", get(get_time_slot))
        .route("/timeslots/table/:table_id", get(list_by_table))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/timeslots", post(create_time_slot))
        .route("/timeslots/:id", delete(delete_time_slot))
}

#[instrument(skip(state))]
pub async fn list_time_slots(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeSlotResponse>>, ApiError> {
    let rows = repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_time_slot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TimeSlotResponse>, ApiError> {
    let slot = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("time slot".into()))?;
    Ok(Json(slot.into()))
}

#[instrument(skip(state))]
pub async fn list_by_table(
    State(state): State<AppState>,
    Path(table_id): Path<Uuid>,
) -> Result<Json<Vec<TimeSlotResponse>>, ApiError> {
    let rows = repo::list_by_table(&state.db, table_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_time_slot(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), ApiError> {
    if payload.start_time >= payload.end_time {
        warn!("time slot start not before end");
        return Err(ApiError::Validation(
            "start_time must be before end_time".into(),
        ));
    }

    if tables::repo::find_by_id(&state.db, payload.table_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("table".into()));
    }

    let slot = repo::create(
        &state.db,
        payload.table_id,
        payload.start_time,
        payload.end_time,
    )
    .await?;

    info!(time_slot_id = %slot.id, admin_id = %admin.id, "time slot created");
    Ok((StatusCode::CREATED, Json(slot.into())))
}

#[instrument(skip(state))]
pub async fn delete_time_slot(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = repo::delete_by_id(&state.db, id).await?;
    info!(time_slot_id = %id, admin_id = %admin.id, deleted, "time slot delete");
    Ok(StatusCode::NO_CONTENT)
}
