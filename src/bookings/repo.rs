use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub user_id: Uuid,
    pub party_size: i32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub created_at: OffsetDateTime,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>(
        r#"
        SELECT id, time_slot_id, user_id, party_size,
               customer_name, customer_phone, customer_email, created_at
        FROM bookings
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Booking>> {
    let row = sqlx::query_as::<_, Booking>(
        r#"
        SELECT id, time_slot_id, user_id, party_size,
               customer_name, customer_phone, customer_email, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn find_by_user_and_id(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> anyhow::Result<Option<Booking>> {
    let row = sqlx::query_as::<_, Booking>(
        r#"
        SELECT id, time_slot_id, user_id, party_size,
               customer_name, customer_phone, customer_email, created_at
        FROM bookings
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_by_time_slot(db: &PgPool, time_slot_id: Uuid) -> anyhow::Result<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>(
        r#"
        SELECT id, time_slot_id, user_id, party_size,
               customer_name, customer_phone, customer_email, created_at
        FROM bookings
        WHERE time_slot_id = $1
        "#,
    )
    .bind(time_slot_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Inserts the booking only if the slot is still vacant. The unique index on
/// `time_slot_id` makes the check-and-insert a single atomic statement, so two
/// concurrent callers can never both get a row back. Returns `None` when the
/// slot was already taken.
pub async fn insert_if_vacant(
    db: &PgPool,
    time_slot_id: Uuid,
    user_id: Uuid,
    party_size: i32,
    customer_name: &str,
    customer_phone: Option<&str>,
    customer_email: Option<&str>,
) -> anyhow::Result<Option<Booking>> {
    let row = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings
            (time_slot_id, user_id, party_size, customer_name, customer_phone, customer_email)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (time_slot_id) DO NOTHING
        RETURNING id, time_slot_id, user_id, party_size,
                  customer_name, customer_phone, customer_email, created_at
        "#,
    )
    .bind(time_slot_id)
    .bind(user_id)
    .bind(party_size)
    .bind(customer_name)
    .bind(customer_phone)
    .bind(customer_email)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_user_and_id(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
