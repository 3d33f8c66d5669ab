//! Liveness and readiness. Both report the running package version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    version: &'static str,
    /// Only reported by `/ready`.
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<&'static str>,
}

impl ServiceStatus {
    fn new(status: &'static str, store: Option<&'static str>) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store,
        }
    }
}

async fn health() -> Json<ServiceStatus> {
    Json(ServiceStatus::new("ok", None))
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ServiceStatus>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ServiceStatus::new("ok", Some("ok")))),
        Err(e) => {
            tracing::warn!(error = %e, "store did not answer the readiness check");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ServiceStatus::new("degraded", Some("unavailable"))),
            )
        }
    }
}

/// GET /health and GET /ready.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
