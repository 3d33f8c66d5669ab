//! End-to-end tests of the product API over the in-memory store.
//!
//! Requests go through the full router (validation, handlers, error mapping) with `oneshot`.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use products_api::{app, AppState, Config, InMemoryProductStore, NewProduct, ProductStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<InMemoryProductStore>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_env(&[])
    }

    fn with_env(vars: &[(&str, &str)]) -> Self {
        let store = Arc::new(InMemoryProductStore::new());
        let config = Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap();
        let router = app(AppState::new(store.clone()), &config);
        Self { router, store }
    }

    async fn seed(&self, name: &str, price: f64) -> i64 {
        self.store
            .insert(NewProduct {
                name: name.into(),
                price,
            })
            .await
            .unwrap()
            .id
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = self.call(builder.body(body).unwrap()).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn call(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

fn messages(body: &Value) -> Vec<&str> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn create_without_body_reports_four_errors() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::POST, "/api/products", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn create_returns_created_product() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Mouse Testing", "price": 100 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("errors").is_none());
    let data = &body["data"];
    assert_eq!(data["name"], "Mouse Testing");
    assert_eq!(data["price"].as_f64(), Some(100.0));
    assert_eq!(data["availability"], true);
    assert!(data["id"].as_i64().is_some());
}

#[tokio::test]
async fn create_rejects_non_positive_price() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Mouse Testing", "price": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid price"]);
}

#[tokio::test]
async fn create_rejects_non_numeric_price_twice() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Mouse Testing", "price": "hola" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid value", "Invalid price"]);
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_products_by_price_descending() {
    let app = TestApp::new();
    app.seed("Keyboard", 45.0).await;
    app.seed("Monitor", 300.0).await;
    app.seed("Mouse", 20.0).await;

    let request = Request::builder()
        .uri("/api/products")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("application/json"));

    let (_, body) = app.send(Method::GET, "/api/products", None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Monitor", "Keyboard", "Mouse"]);
}

#[tokio::test]
async fn list_of_empty_store_is_empty_array() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn get_missing_product_is_404() {
    let app = TestApp::new();
    app.seed("Mouse", 20.0).await;
    let (status, body) = app.send(Method::GET, "/api/products/200", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn get_with_non_integer_id_is_400() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/products/hola", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid id"]);
    assert_eq!(body["errors"][0]["location"], "params");
    assert_eq!(body["errors"][0]["value"], "hola");
}

#[tokio::test]
async fn get_existing_product() {
    let app = TestApp::new();
    let id = app.seed("Mouse", 20.0).await;
    let (status, body) = app
        .send(Method::GET, &format!("/api/products/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["name"], "Mouse");
}

#[tokio::test]
async fn update_with_empty_body_reports_four_errors() {
    let app = TestApp::new();
    let id = app.seed("Monitor", 300.0).await;
    let (status, body) = app
        .send(Method::PUT, &format!("/api/products/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn update_rejects_negative_price() {
    let app = TestApp::new();
    let id = app.seed("Monitor", 300.0).await;
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(json!({ "name": "Curved monitor", "price": -100, "availability": false })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid price"]);
}

#[tokio::test]
async fn update_validates_before_checking_existence() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::PUT, "/api/products/hola", Some(json!({ "name": "x", "price": 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid id"]);

    let (status, _) = app.send(Method::PUT, "/api/products/3256", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_product_is_404() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::PUT,
            "/api/products/3256",
            Some(json!({ "name": "Curved monitor", "price": 100, "availability": false })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = TestApp::new();
    let id = app.seed("Monitor", 300.0).await;
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(json!({ "name": "Curved monitor", "price": 100, "availability": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("errors").is_none());
    assert_eq!(body["data"]["name"], "Curved monitor");
    assert_eq!(body["data"]["price"].as_f64(), Some(100.0));
    assert_eq!(body["data"]["availability"], false);

    let stored = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Curved monitor");
    assert!(!stored.availability);
}

#[tokio::test]
async fn update_without_availability_keeps_it() {
    let app = TestApp::new();
    let id = app.seed("Monitor", 300.0).await;
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(json!({ "name": "Monitor", "price": 250 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], true);
}

#[tokio::test]
async fn update_rejects_non_boolean_availability() {
    let app = TestApp::new();
    let id = app.seed("Monitor", 300.0).await;
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(json!({ "name": "Monitor", "price": 250, "availability": "no" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid availability"]);
}

#[tokio::test]
async fn toggle_missing_product_is_404() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::PATCH, "/api/products/515", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn toggling_twice_restores_availability() {
    let app = TestApp::new();
    let id = app.seed("Mouse", 20.0).await;
    let uri = format!("/api/products/{id}");

    let (status, body) = app.send(Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], false);

    let (status, body) = app.send(Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], true);
}

#[tokio::test]
async fn delete_with_invalid_id_is_400() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::DELETE, "/api/products/not-valid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid id"]);
}

#[tokio::test]
async fn delete_missing_product_is_404() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::DELETE, "/api/products/2000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn deleted_product_is_no_longer_found() {
    let app = TestApp::new();
    let id = app.seed("Mouse", 20.0).await;
    let uri = format!("/api/products/{id}");

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], format!("Product #{id} deleted"));

    let (status, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn unknown_path_falls_through_to_404() {
    let app = TestApp::new();
    let (status, _) = app.send(Method::GET, "/api/products/1/extra", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("store").is_none());

    let (status, body) = app.send(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "ok");

    let (status, body) = app.send(Method::GET, "/docs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"].get("/api/products/{id}").is_some());
}

#[tokio::test]
async fn oversized_body_is_rejected_with_413() {
    let app = TestApp::new();
    let name = "x".repeat(products_api::server::BODY_LIMIT_BYTES + 1);
    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({ "name": name, "price": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({ "error": "Request body too large" }));
    assert!(app.store.list_by_price_desc().await.unwrap().is_empty());
}

async fn get_with_origin(app: &TestApp, origin: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/products")
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap();
    app.call(request).await
}

#[tokio::test]
async fn cors_headers_only_for_the_frontend_origin() {
    let app = TestApp::with_env(&[("FRONTEND_URL", "http://localhost:5173")]);

    let response = get_with_origin(&app, "http://localhost:5173").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );

    let response = get_with_origin(&app, "http://evil.example").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn no_cors_headers_without_a_frontend_origin() {
    let app = TestApp::new();
    let response = get_with_origin(&app, "http://localhost:5173").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
