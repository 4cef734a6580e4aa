use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{BookingResponse, CreateBookingRequest};
use super::services;
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/timeslot/:time_slot_id", get(list_for_time_slot))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/:id", delete(delete_booking))
}

#[instrument(skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let rows = services::list_bookings(&state, &caller).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_booking(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = services::get_booking(&state, &caller, id).await?;
    Ok(Json(booking.into()))
}

#[instrument(skip(state))]
pub async fn list_for_time_slot(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(time_slot_id): Path<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let rows = services::list_for_time_slot(&state, time_slot_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_booking(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let booking = services::create_booking(&state, &caller, payload).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

#[instrument(skip(state))]
pub async fn delete_booking(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    services::delete_booking(&state, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
