//! Product record and the inputs that create or change one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted product. `price > 0` and a non-empty `name` hold for every stored row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Curved monitor 49 inch")]
    pub name: String,
    #[schema(example = 500.0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Full replace of name and price; availability only when supplied.
    pub fn apply(&mut self, update: ProductUpdate) {
        self.name = update.name;
        self.price = update.price;
        if let Some(availability) = update.availability {
            self.availability = availability;
        }
    }

    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}

/// Fields accepted when creating a product. Availability starts as `true`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Fields accepted by a full update.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    pub availability: Option<bool>,
}

/// Request body for create and update, as documented in the OpenAPI schema.
#[derive(ToSchema)]
pub struct ProductInput {
    #[schema(example = "Curved monitor 49 inch")]
    pub name: String,
    #[schema(example = 300.0)]
    pub price: f64,
    /// Only read by full update.
    #[schema(example = true)]
    pub availability: Option<bool>,
}
