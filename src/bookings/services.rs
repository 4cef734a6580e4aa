use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::bookings::dto::CreateBookingRequest;
use crate::bookings::repo::{self, Booking};
use crate::error::ApiError;
use crate::state::AppState;
use crate::timeslots;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn validate(req: &CreateBookingRequest) -> Result<(), ApiError> {
    if req.party_size < 1 {
        return Err(ApiError::Validation("party_size must be positive".into()));
    }
    if req.customer_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "customer_name must not be empty".into(),
        ));
    }
    if let Some(email) = req.customer_email.as_deref() {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("customer_email is invalid".into()));
        }
    }
    Ok(())
}

/// Creates a booking for the caller, guaranteeing at most one booking per
/// time slot. The vacancy check and the insert are one atomic statement, so
/// a successful result means the slot held no booking when the row landed.
pub async fn create_booking(
    state: &AppState,
    caller: &AuthUser,
    req: CreateBookingRequest,
) -> Result<Booking, ApiError> {
    validate(&req)?;

    if timeslots::repo::find_by_id(&state.db, req.time_slot_id)
        .await?
        .is_none()
    {
        warn!(time_slot_id = %req.time_slot_id, "booking for missing time slot");
        return Err(ApiError::NotFound("time slot".into()));
    }

    let booking = repo::insert_if_vacant(
        &state.db,
        req.time_slot_id,
        caller.id,
        req.party_size,
        req.customer_name.trim(),
        req.customer_phone.as_deref(),
        req.customer_email.as_deref(),
    )
    .await?;

    match booking {
        Some(b) => {
            info!(booking_id = %b.id, time_slot_id = %b.time_slot_id, user_id = %caller.id, "booking created");
            Ok(b)
        }
        None => {
            warn!(time_slot_id = %req.time_slot_id, user_id = %caller.id, "time slot already booked");
            Err(ApiError::Conflict("Time slot already booked".into()))
        }
    }
}

/// Admins see any booking; ordinary callers only their own when ownership
/// scoping is enabled. A foreign booking surfaces as NotFound so its
/// existence is not leaked.
pub async fn get_booking(
    state: &AppState,
    caller: &AuthUser,
    id: Uuid,
) -> Result<Booking, ApiError> {
    let booking = if caller.is_admin() || !state.config.owner_scoped_bookings {
        repo::find_by_id(&state.db, id).await?
    } else {
        repo::find_by_user_and_id(&state.db, caller.id, id).await?
    };
    booking.ok_or_else(|| ApiError::NotFound("booking".into()))
}

pub async fn list_bookings(state: &AppState, caller: &AuthUser) -> Result<Vec<Booking>, ApiError> {
    if state.config.owner_scoped_bookings && !caller.is_admin() {
        warn!(user_id = %caller.id, "booking list denied");
        return Err(ApiError::Forbidden("Admin role required".into()));
    }
    Ok(repo::list(&state.db).await?)
}

pub async fn list_for_time_slot(
    state: &AppState,
    time_slot_id: Uuid,
) -> Result<Vec<Booking>, ApiError> {
    Ok(repo::list_by_time_slot(&state.db, time_slot_id).await?)
}

/// Admins delete unconditionally (no-op when absent). Owners delete their
/// own bookings; anyone else gets NotFound without touching the row. With
/// scoping disabled, deletion is admin-only.
pub async fn delete_booking(state: &AppState, caller: &AuthUser, id: Uuid) -> Result<(), ApiError> {
    if caller.is_admin() {
        let deleted = repo::delete_by_id(&state.db, id).await?;
        info!(booking_id = %id, user_id = %caller.id, deleted, "booking delete (admin)");
        return Ok(());
    }

    if !state.config.owner_scoped_bookings {
        warn!(booking_id = %id, user_id = %caller.id, "booking delete denied");
        return Err(ApiError::Forbidden("Admin role required".into()));
    }

    let deleted = repo::delete_by_user_and_id(&state.db, caller.id, id).await?;
    if deleted == 0 {
        warn!(booking_id = %id, user_id = %caller.id, "booking delete matched nothing");
        return Err(ApiError::NotFound("booking".into()));
    }
    info!(booking_id = %id, user_id = %caller.id, "booking deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(party_size: i32, name: &str, email: Option<&str>) -> CreateBookingRequest {
        CreateBookingRequest {
            time_slot_id: Uuid::new_v4(),
            party_size,
            customer_name: name.to_string(),
            customer_phone: None,
            customer_email: email.map(str::to_string),
        }
    }

    #[test]
    fn rejects_non_positive_party_size() {
        assert!(validate(&request(0, "Alice", None)).is_err());
        assert!(validate(&request(-3, "Alice", None)).is_err());
        assert!(validate(&request(1, "Alice", None)).is_ok());
    }

    #[test]
    fn rejects_blank_customer_name() {
        assert!(validate(&request(2, "", None)).is_err());
        assert!(validate(&request(2, "   ", None)).is_err());
    }

    #[test]
    fn rejects_malformed_customer_email() {
        assert!(validate(&request(2, "Alice", Some("not-an-email"))).is_err());
        assert!(validate(&request(2, "Alice", Some("alice@example.com"))).is_ok());
    }
}
