use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{CreateRestaurantRequest, RestaurantResponse};
use super::repo;
use crate::{auth::AdminUser, error::ApiError, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/:id", get(get_restaurant))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", post(create_restaurant))
        .route("/restaurants/:id", delete(delete_restaurant))
}

#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let rows = repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let restaurant = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("restaurant".into()))?;
    Ok(Json(restaurant.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ApiError> {
    if payload.name.trim().is_empty() {
        warn!("restaurant name empty");
        return Err(ApiError::Validation("Name must not be empty".into()));
    }

    let restaurant = repo::create(
        &state.db,
        payload.name.trim(),
        &payload.address,
        &payload.phone,
        &payload.email,
    )
    .await?;

    info!(restaurant_id = %restaurant.id, admin_id = %admin.id, "restaurant created");
    Ok((StatusCode::CREATED, Json(restaurant.into())))
}

#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = repo::delete_by_id(&state.db, id).await?;
    info!(restaurant_id = %id, admin_id = %admin.id, deleted, "restaurant delete");
    Ok(StatusCode::NO_CONTENT)
}
