use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use edgepad::infrastructure::{Config, SqliteStore};
use edgepad::ports::{create_router, AppState, SharedStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test fixture owning a temporary SQLite database
#[allow(dead_code)]
pub struct TestDb {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
}

#[allow(dead_code)]
impl TestDb {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let db_path = temp_dir.path().join("data").join("edgepad.db");
        Ok(Self {
            _temp_dir: temp_dir,
            db_path,
        })
    }

    pub fn open_store(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.db_path)
    }

    /// Router over this database with default limits
    pub fn router(&self) -> Result<Router> {
        self.router_with(Config::default())
    }

    pub fn router_with(&self, config: Config) -> Result<Router> {
        let store: SharedStore = Arc::new(self.open_store()?);
        let max_body = config.server.max_body_bytes;
        Ok(create_router(Arc::new(AppState::new(store, &config)), max_body))
    }
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .expect("request"),
    )
    .await
}

#[allow(dead_code)]
pub async fn send_json(app: &Router, method: &str, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
}

#[allow(dead_code)]
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: &str,
    body: &str,
) -> Response {
    send(
        app,
        Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", content_type)
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8_lossy(&bytes).into_owned()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("JSON body")
}

#[allow(dead_code)]
pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
