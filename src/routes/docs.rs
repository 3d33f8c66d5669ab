//! API documentation route.

use crate::docs::ApiDoc;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /docs: the OpenAPI 3 document as JSON.
pub fn docs_routes() -> Router {
    Router::new().route("/docs", get(openapi))
}
