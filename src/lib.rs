//! Products API: CRUD over a single product resource, backed by PostgreSQL.

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;
pub mod validation;

pub use config::{Config, PoolSettings};
pub use docs::ApiDoc;
pub use error::{AppError, ConfigError};
pub use model::{NewProduct, Product, ProductUpdate};
pub use routes::{common_routes, docs_routes, product_routes};
pub use server::{app, serve};
pub use state::AppState;
pub use store::{connect, InMemoryProductStore, PgProductStore, ProductStore};
