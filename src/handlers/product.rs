//! Product CRUD handlers. Validation has already run by the time a handler body executes.

use crate::error::{AppError, ErrorBody, ValidationBody};
use crate::extractors::Validated;
use crate::model::{Product, ProductInput};
use crate::response::{success_created, success_ok};
use crate::state::AppState;
use crate::store::ProductStore;
use crate::validation::{ById, CreateProduct, UpdateProduct};
use axum::{extract::State, response::IntoResponse};

/// Identity lookup shared by every handler that takes a path id.
async fn find_or_404(store: &dyn ProductStore, id: i64) -> Result<Product, AppError> {
    store.find_by_id(id).await?.ok_or(AppError::NotFound)
}

/// Get a list of products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    description = "Return every product, most expensive first",
    responses(
        (status = 200, description = "Successful response", body = crate::docs::ProductList),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.store.list_by_price_desc().await?;
    Ok(success_ok(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = crate::docs::ProductData),
        (status = 400, description = "Invalid ID", body = ValidationBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Validated(id): Validated<ById>,
) -> Result<impl IntoResponse, AppError> {
    let product = find_or_404(state.store.as_ref(), id).await?;
    Ok(success_ok(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = crate::docs::ProductData),
        (status = 400, description = "Bad request, invalid input data", body = ValidationBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Validated(new_product): Validated<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.store.insert(new_product).await?;
    tracing::info!(id = product.id, "product created");
    Ok(success_created(product))
}

/// Update a product with user input
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Successful response", body = crate::docs::ProductData),
        (status = 400, description = "Bad request, invalid ID or invalid input data", body = ValidationBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Validated((id, changes)): Validated<UpdateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let mut product = find_or_404(state.store.as_ref(), id).await?;
    product.apply(changes);
    let product = state.store.save(&product).await?;
    Ok(success_ok(product))
}

/// Toggle product availability
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to toggle")),
    responses(
        (status = 200, description = "Successful response", body = crate::docs::ProductData),
        (status = 400, description = "Invalid ID", body = ValidationBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    Validated(id): Validated<ById>,
) -> Result<impl IntoResponse, AppError> {
    let mut product = find_or_404(state.store.as_ref(), id).await?;
    product.toggle_availability();
    let product = state.store.save(&product).await?;
    Ok(success_ok(product))
}

/// Delete a product by ID
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Message naming the deleted product", body = crate::docs::MessageData),
        (status = 400, description = "Invalid ID", body = ValidationBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Validated(id): Validated<ById>,
) -> Result<impl IntoResponse, AppError> {
    let product = find_or_404(state.store.as_ref(), id).await?;
    if !state.store.delete(product.id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(id, "product deleted");
    Ok(success_ok(format!("Product #{} deleted", id)))
}
