use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::restaurants::repo::Restaurant;

#[derive(Debug, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            phone: r.phone,
            email: r.email,
            created_at: r.created_at,
        }
    }
}
