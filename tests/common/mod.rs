#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use time::OffsetDateTime;
use uuid::Uuid;

use tablebook::auth::{self, AuthUser, Role};
use tablebook::config::{AppConfig, JwtConfig};
use tablebook::state::AppState;
use tablebook::{restaurants, tables, timeslots};

pub fn test_config(database_url: &str, owner_scoped: bool) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret".into(),
            issuer: "tablebook-test".into(),
            audience: "tablebook-test-users".into(),
            ttl_minutes: 5,
            refresh_ttl_minutes: 60,
        },
        owner_scoped_bookings: owner_scoped,
    })
}

/// Connects to TEST_DATABASE_URL and runs migrations. Returns None (so the
/// test skips) when the variable is unset or the database is unreachable.
pub async fn test_state() -> Option<AppState> {
    test_state_with_scoping(true).await
}

pub async fn test_state_with_scoping(owner_scoped: bool) -> Option<AppState> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping");
            return None;
        }
    };
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!("./migrations").run(&db).await.ok()?;
    Some(AppState::from_parts(db, test_config(&url, owner_scoped)))
}

pub async fn make_user(state: &AppState, roles: &[Role]) -> AuthUser {
    let username = format!("u_{}", Uuid::new_v4().simple());
    let hash = auth::password::hash_password("integration-pass").expect("hash password");
    let user = auth::repo::create(&state.db, &username, &hash, roles)
        .await
        .expect("create user");
    AuthUser {
        id: user.id,
        roles: user.roles,
    }
}

pub struct Fixture {
    pub restaurant_id: Uuid,
    pub table_id: Uuid,
    pub time_slot_id: Uuid,
}

/// Restaurant "R1" with table 1 (capacity 4) and a 10:00-12:00 slot.
pub async fn seed_slot(state: &AppState) -> Fixture {
    let restaurant = restaurants::repo::create(
        &state.db,
        "R1",
        "1 Main St",
        "+1-555-0100",
        "r1@example.com",
    )
    .await
    .expect("create restaurant");

    let table = tables::repo::create(&state.db, restaurant.id, 1, 4)
        .await
        .expect("create table");

    let start = OffsetDateTime::from_unix_timestamp(1_790_000_000 + rand_offset()).expect("start");
    let slot = timeslots::repo::create(&state.db, table.id, start, start + time::Duration::hours(2))
        .await
        .expect("create time slot");

    Fixture {
        restaurant_id: restaurant.id,
        table_id: table.id,
        time_slot_id: slot.id,
    }
}

// Spread fixture slots out so repeated runs against the same database never
// collide on anything but the unique booking index under test.
fn rand_offset() -> i64 {
    (Uuid::new_v4().as_u128() % 1_000_000) as i64
}
