use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::bookings::repo::Booking;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub time_slot_id: Uuid,
    pub party_size: i32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub user_id: Uuid,
    pub party_size: i32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            time_slot_id: b.time_slot_id,
            user_id: b.user_id,
            party_size: b.party_size,
            customer_name: b.customer_name,
            customer_phone: b.customer_phone,
            customer_email: b.customer_email,
            created_at: b.created_at,
        }
    }
}
