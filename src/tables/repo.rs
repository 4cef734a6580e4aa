use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RestaurantTable {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub capacity: i32,
    pub created_at: OffsetDateTime,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<RestaurantTable>> {
    let rows = sqlx::query_as::<_, RestaurantTable>(
        r#"
        SELECT id, restaurant_id, table_number, capacity, created_at
        FROM restaurant_tables
        ORDER BY table_number
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<RestaurantTable>> {
    let row = sqlx::query_as::<_, RestaurantTable>(
        r#"
        SELECT id, restaurant_id, table_number, capacity, created_at
        FROM restaurant_tables
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_by_restaurant(
    db: &PgPool,
    restaurant_id: Uuid,
) -> anyhow::Result<Vec<RestaurantTable>> {
    let rows = sqlx::query_as::<_, RestaurantTable>(
        r#"
        SELECT id, restaurant_id, table_number, capacity, created_at
        FROM restaurant_tables
        WHERE restaurant_id = $1
        ORDER BY table_number
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    restaurant_id: Uuid,
    table_number: i32,
    capacity: i32,
) -> anyhow::Result<RestaurantTable> {
    let row = sqlx::query_as::<_, RestaurantTable>(
        r#"
        INSERT INTO restaurant_tables (restaurant_id, table_number, capacity)
        VALUES ($1, $2, $3)
        RETURNING id, restaurant_id, table_number, capacity, created_at
        "#,
    )
    .bind(restaurant_id)
    .bind(table_number)
    .bind(capacity)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM restaurant_tables WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
