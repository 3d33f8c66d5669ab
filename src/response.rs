//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `{"data": ...}`
#[derive(Serialize)]
pub struct Success<T> {
    pub data: T,
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::OK, Json(Success { data }))
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::CREATED, Json(Success { data }))
}
