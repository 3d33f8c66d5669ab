//! Typed errors and HTTP mapping.

use crate::validation::FieldError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned whenever a product id does not resolve.
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },
    #[error("invalid bind address '{0}'")]
    BindAddr(String),
    #[error("invalid CORS origin '{0}'")]
    Origin(String),
    #[error("DATABASE_URL is not set (pass --in-memory to run without a database)")]
    MissingDatabaseUrl,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("request failed validation ({} errors)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Product not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request body too large")]
    PayloadTooLarge,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// `{"error": "..."}`
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// `{"errors": [...]}`
#[derive(Serialize, ToSchema)]
pub struct ValidationBody {
    pub errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response()
            }
            AppError::NotFound | AppError::Db(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: NOT_FOUND_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorBody {
                    error: "Request body too large".to_string(),
                }),
            )
                .into_response(),
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
