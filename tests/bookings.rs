mod common;

use uuid::Uuid;

use tablebook::auth::Role;
use tablebook::bookings::dto::CreateBookingRequest;
use tablebook::bookings::{repo, services};
use tablebook::error::ApiError;

fn booking_request(time_slot_id: Uuid, name: &str, party_size: i32) -> CreateBookingRequest {
    CreateBookingRequest {
        time_slot_id,
        party_size,
        customer_name: name.to_string(),
        customer_phone: Some("+1-555-0101".into()),
        customer_email: Some(format!("{}@example.com", name.to_lowercase())),
    }
}

#[tokio::test]
async fn first_booking_succeeds_second_conflicts() {
    let Some(state) = common::test_state().await else {
        return;
    };
    let fixture = common::seed_slot(&state).await;
    let alice = common::make_user(&state, &[Role::User]).await;
    let bob = common::make_user(&state, &[Role::User]).await;

    let booking = services::create_booking(
        &state,
        &alice,
        booking_request(fixture.time_slot_id, "Alice", 2),
    )
    .await
    .expect("first booking should succeed");
    assert_eq!(booking.time_slot_id, fixture.time_slot_id);
    assert_eq!(booking.user_id, alice.id);
    assert_eq!(booking.customer_name, "Alice");

    let err = services::create_booking(
        &state,
        &bob,
        booking_request(fixture.time_slot_id, "Bob", 3),
    )
    .await
    .expect_err("second booking should conflict");
    assert!(matches!(err, ApiError::Conflict(_)));

    // the store still holds exactly Alice's booking
    let rows = repo::list_by_time_slot(&state.db, fixture.time_slot_id)
        .await
        .expect("list by time slot");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].customer_name, "Alice");
}

#[tokio::test]
async fn concurrent_bookings_leave_exactly_one_survivor() {
    let Some(state) = common::test_state().await else {
        return;
    };
    let fixture = common::seed_slot(&state).await;
    let alice = common::make_user(&state, &[Role::User]).await;
    let bob = common::make_user(&state, &[Role::User]).await;

    let (a, b) = tokio::join!(
        services::create_booking(
            &state,
            &alice,
            booking_request(fixture.time_slot_id, "Alice", 2),
        ),
        services::create_booking(
            &state,
            &bob,
            booking_request(fixture.time_slot_id, "Bob", 3),
        ),
    );

    let succeeded = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(succeeded, 1, "exactly one concurrent booking may win");
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, ApiError::Conflict(_)));

    let rows = repo::list_by_time_slot(&state.db, fixture.time_slot_id)
        .await
        .expect("list by time slot");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn booking_missing_time_slot_is_not_found() {
    let Some(state) = common::test_state().await else {
        return;
    };
    let alice = common::make_user(&state, &[Role::User]).await;

    let err = services::create_booking(
        &state,
        &alice,
        booking_request(Uuid::new_v4(), "Alice", 2),
    )
    .await
    .expect_err("missing slot should be rejected");
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn non_owner_read_is_not_found_admin_sees_everything() {
    let Some(state) = common::test_state().await else {
        return;
    };
    let fixture = common::seed_slot(&state).await;
    let alice = common::make_user(&state, &[Role::User]).await;
    let bob = common::make_user(&state, &[Role::User]).await;
    let admin = common::make_user(&state, &[Role::Admin]).await;

    let booking = services::create_booking(
        &state,
        &alice,
        booking_request(fixture.time_slot_id, "Alice", 2),
    )
    .await
    .expect("booking");

    let seen = services::get_booking(&state, &alice, booking.id)
        .await
        .expect("owner sees own booking");
    assert_eq!(seen.id, booking.id);

    let err = services::get_booking(&state, &bob, booking.id)
        .await
        .expect_err("non-owner must not see the booking");
    assert!(matches!(err, ApiError::NotFound(_)));

    let seen = services::get_booking(&state, &admin, booking.id)
        .await
        .expect("admin sees any booking");
    assert_eq!(seen.id, booking.id);
}

#[tokio::test]
async fn delete_is_owner_scoped_and_admin_unconditional() {
    let Some(state) = common::test_state().await else {
        return;
    };
    let fixture = common::seed_slot(&state).await;
    let alice = common::make_user(&state, &[Role::User]).await;
    let bob = common::make_user(&state, &[Role::User]).await;
    let admin = common::make_user(&state, &[Role::Admin]).await;

    let booking = services::create_booking(
        &state,
        &alice,
        booking_request(fixture.time_slot_id, "Alice", 2),
    )
    .await
    .expect("booking");

    // non-owner delete leaves the row intact
    let err = services::delete_booking(&state, &bob, booking.id)
        .await
        .expect_err("non-owner delete must fail");
    assert!(matches!(err, ApiError::NotFound(_)));
    assert!(repo::find_by_id(&state.db, booking.id)
        .await
        .expect("lookup")
        .is_some());

    // owner delete removes it
    services::delete_booking(&state, &alice, booking.id)
        .await
        .expect("owner delete");
    assert!(repo::find_by_id(&state.db, booking.id)
        .await
        .expect("lookup")
        .is_none());

    // admin delete is unconditional and a no-op on an absent id
    let booking = services::create_booking(
        &state,
        &bob,
        booking_request(fixture.time_slot_id, "Bob", 3),
    )
    .await
    .expect("rebook freed slot");
    services::delete_booking(&state, &admin, booking.id)
        .await
        .expect("admin delete");
    services::delete_booking(&state, &admin, Uuid::new_v4())
        .await
        .expect("admin delete of missing id is a no-op");
}

#[tokio::test]
async fn listing_is_admin_only_when_scoped() {
    let Some(state) = common::test_state().await else {
        return;
    };
    let user = common::make_user(&state, &[Role::User]).await;
    let admin = common::make_user(&state, &[Role::Admin]).await;

    let err = services::list_bookings(&state, &user)
        .await
        .expect_err("ordinary caller must not list all bookings");
    assert!(matches!(err, ApiError::Forbidden(_)));

    services::list_bookings(&state, &admin)
        .await
        .expect("admin lists all bookings");
}

#[tokio::test]
async fn unscoped_mode_reads_any_booking_but_keeps_delete_admin_only() {
    let Some(state) = common::test_state_with_scoping(false).await else {
        return;
    };
    let fixture = common::seed_slot(&state).await;
    let alice = common::make_user(&state, &[Role::User]).await;
    let bob = common::make_user(&state, &[Role::User]).await;

    let booking = services::create_booking(
        &state,
        &alice,
        booking_request(fixture.time_slot_id, "Alice", 2),
    )
    .await
    .expect("booking");

    // with scoping off, any authenticated caller reads any booking
    let seen = services::get_booking(&state, &bob, booking.id)
        .await
        .expect("unscoped read");
    assert_eq!(seen.id, booking.id);

    services::list_bookings(&state, &bob)
        .await
        .expect("unscoped listing");

    // deletes stay admin-only, even for the owner
    let err = services::delete_booking(&state, &alice, booking.id)
        .await
        .expect_err("unscoped delete is admin-only");
    assert!(matches!(err, ApiError::Forbidden(_)));
}
