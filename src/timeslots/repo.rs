use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A bounded interval during which a specific table is reservable.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TimeSlot {
    pub id: Uuid,
    pub table_id: Uuid,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<TimeSlot>> {
    let rows = sqlx::query_as::<_, TimeSlot>(
        r#"
        SELECT id, table_id, start_time, end_time, created_at
        FROM time_slots
        ORDER BY start_time
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<TimeSlot>> {
    let row = sqlx::query_as::<_, TimeSlot>(
        r#"
        SELECT id, table_id, start_time, end_time, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_by_table(db: &PgPool, table_id: Uuid) -> anyhow::Result<Vec<TimeSlot>> {
    let rows = sqlx::query_as::<_, TimeSlot>(
        r#"
        SELECT id, table_id, start_time, end_time, created_at
        FROM time_slots
        WHERE table_id = $1
        ORDER BY start_time
        "#,
    )
    .bind(table_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    table_id: Uuid,
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
) -> anyhow::Result<TimeSlot> {
    let row = sqlx::query_as::<_, TimeSlot>(
        r#"
        INSERT INTO time_slots (table_id, start_time, end_time)
        VALUES ($1, $2, $3)
        RETURNING id, table_id, start_time, end_time, created_at
        "#,
    )
    .bind(table_id)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM time_slots WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
