//! Product persistence: the [`ProductStore`] trait and its PostgreSQL and in-memory backends.

mod memory;
mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::{PgProductStore, PRODUCTS_TABLE};

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::model::{NewProduct, Product};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Create the backing table if it does not exist.
    async fn prepare(&self) -> Result<(), AppError>;

    /// Drop every product and start ids again from 1.
    async fn reset(&self) -> Result<(), AppError>;

    /// All products, most expensive first; equal prices by ascending id.
    async fn list_by_price_desc(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Insert with `availability = true` and return the stored row with its assigned id.
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError>;

    /// Write name, price and availability of `product` to the row with the same id.
    /// Returns the stored row; `AppError::NotFound` if the row vanished.
    async fn save(&self, product: &Product) -> Result<Product, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    async fn close(&self);
}

/// Open the store described by `config` and make sure its table exists.
/// Without a database URL this fails unless `config.in_memory` opts into a fresh in-memory store.
pub async fn connect(config: &Config) -> Result<Arc<dyn ProductStore>, AppError> {
    let store: Arc<dyn ProductStore> = match (config.database_url.as_deref(), config.in_memory) {
        (Some(url), _) => Arc::new(PgProductStore::connect(url, &config.pool).await?),
        (None, true) => {
            tracing::warn!("running with --in-memory; products are lost on restart");
            Arc::new(InMemoryProductStore::new())
        }
        (None, false) => return Err(ConfigError::MissingDatabaseUrl.into()),
    };
    store.prepare().await?;
    Ok(store)
}
