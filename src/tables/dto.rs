use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tables::repo::RestaurantTable;

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub capacity: i32,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub capacity: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<RestaurantTable> for TableResponse {
    fn from(t: RestaurantTable) -> Self {
        Self {
            id: t.id,
            restaurant_id: t.restaurant_id,
            table_number: t.table_number,
            capacity: t.capacity,
            created_at: t.created_at,
        }
    }
}
