use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Restaurant>> {
    let rows = sqlx::query_as::<_, Restaurant>(
        r#"
        SELECT id, name, address, phone, email, created_at
        FROM restaurants
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Restaurant>> {
    let row = sqlx::query_as::<_, Restaurant>(
        r#"
        SELECT id, name, address, phone, email, created_at
        FROM restaurants
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    address: &str,
    phone: &str,
    email: &str,
) -> anyhow::Result<Restaurant> {
    let row = sqlx::query_as::<_, Restaurant>(
        r#"
        INSERT INTO restaurants (name, address, phone, email)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, address, phone, email, created_at
        "#,
    )
    .bind(name)
    .bind(address)
    .bind(phone)
    .bind(email)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
