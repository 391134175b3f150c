//! Helpers for driving the router in-process.

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::{create_router, initialize_backend, AppState};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig {
            data_directory: temp_dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).await.unwrap();
        let router = create_router(state.clone(), &config).unwrap();
        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    router.clone().oneshot(request).await.unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
