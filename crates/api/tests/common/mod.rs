#![allow(dead_code)] // not every test binary uses every helper

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use karvan_api::catalog::CatalogStore;
use karvan_api::config::{Environment, ServerConfig};
use karvan_api::router::build_app_router;
use karvan_api::service::RegistrationService;
use karvan_api::state::AppState;
use karvan_db::journal::RegistrationJournal;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(data_dir: &Path, catalog_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: Environment::Development,
        database_url: String::new(),
        data_dir: data_dir.to_path_buf(),
        catalog_dir: catalog_dir.to_path_buf(),
        reconcile_interval_secs: 60,
    }
}

/// Build the full application router with all middleware layers, backed by
/// the given pool and temp directories.
///
/// Uses `build_app_router` so integration tests exercise the exact
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses. Also returns the journal handle so tests can
/// inspect the fallback store.
pub async fn build_test_app(
    pool: PgPool,
    data_dir: &Path,
    catalog_dir: &Path,
) -> (Router, Arc<RegistrationJournal>) {
    let config = test_config(data_dir, catalog_dir);

    let journal = Arc::new(
        RegistrationJournal::open(data_dir)
            .await
            .expect("journal open"),
    );
    let registrations = Arc::new(RegistrationService::new(pool.clone(), Arc::clone(&journal)));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog: Arc::new(CatalogStore::new(catalog_dir)),
        registrations,
    };

    (build_app_router(state, &config), journal)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a PATCH request with a JSON body.
pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response status and return its JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
