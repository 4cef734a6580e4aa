use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::timeslots::repo::TimeSlot;

#[derive(Debug, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub table_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct TimeSlotResponse {
    pub id: Uuid,
    pub table_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<TimeSlot> for TimeSlotResponse {
    fn from(s: TimeSlot) -> Self {
        Self {
            id: s.id,
            table_id: s.table_id,
            start_time: s.start_time,
            end_time: s.end_time,
            created_at: s.created_at,
        }
    }
}
