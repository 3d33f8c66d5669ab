//! OpenAPI document for the product API.

use crate::error::{ErrorBody, ValidationBody};
use crate::handlers::product;
use crate::model::{Product, ProductInput};
use crate::validation::{FieldError, Location};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// `{"data": Product}`
#[derive(Serialize, ToSchema)]
pub struct ProductData {
    pub data: Product,
}

/// `{"data": [Product]}`
#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub data: Vec<Product>,
}

/// `{"data": "Product #1 deleted"}`
#[derive(Serialize, ToSchema)]
pub struct MessageData {
    #[schema(example = "Product #1 deleted")]
    pub data: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products REST API",
        description = "API docs for products"
    ),
    paths(
        product::list,
        product::read,
        product::create,
        product::update,
        product::toggle_availability,
        product::delete,
    ),
    components(schemas(
        Product,
        ProductInput,
        ProductData,
        ProductList,
        MessageData,
        ErrorBody,
        ValidationBody,
        FieldError,
        Location,
    )),
    tags((name = "Products", description = "API operations related to products"))
)]
pub struct ApiDoc;
