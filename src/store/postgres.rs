//! PostgreSQL-backed product store.

use super::ProductStore;
use crate::config::PoolSettings;
use crate::error::AppError;
use crate::model::{NewProduct, Product};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub const PRODUCTS_TABLE: &str = "products";

const COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(database_url)
            .await?;
        tracing::info!(max_connections = settings.max_connections, "connected to database");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn prepare(&self) -> Result<(), AppError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL CHECK (name <> ''),
                price DOUBLE PRECISION NOT NULL CHECK (price > 0),
                availability BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            PRODUCTS_TABLE
        );
        tracing::debug!(sql = %ddl, "query");
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<(), AppError> {
        let sql = format!("DROP TABLE IF EXISTS {}", PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        sqlx::query(&sql).execute(&self.pool).await?;
        self.prepare().await
    }

    async fn list_by_price_desc(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY price DESC, id ASC",
            COLUMNS, PRODUCTS_TABLE
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, price) VALUES ($1, $2) RETURNING {}",
            PRODUCTS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, name = %product.name, price = product.price, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&product.name)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, product: &Product) -> Result<Product, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCTS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id = product.id, "query");
        sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}
