//! In-memory product store. Ids are assigned from a counter, rows kept ordered by id.

use super::ProductStore;
use crate::error::AppError;
use crate::model::{NewProduct, Product};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryProductStore {
    table: RwLock<Table>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn prepare(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn reset(&self) -> Result<(), AppError> {
        *self.table.write().await = Table::default();
        Ok(())
    }

    async fn list_by_price_desc(&self) -> Result<Vec<Product>, AppError> {
        let table = self.table.read().await;
        let mut products: Vec<Product> = table.rows.values().cloned().collect();
        // stable sort keeps id order among equal prices
        products.sort_by(|a, b| b.price.total_cmp(&a.price));
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let now = Utc::now();
        let row = Product {
            id: table.last_id,
            name: product.name,
            price: product.price,
            availability: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save(&self, product: &Product) -> Result<Product, AppError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&product.id).ok_or(AppError::NotFound)?;
        row.name = product.name.clone();
        row.price = product.price;
        row.availability = product.availability;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}
