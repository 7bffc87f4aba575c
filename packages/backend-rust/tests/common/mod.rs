#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use hanzi_algo::SchedulerParams;
use hanzi_backend_rust::build_app;
use hanzi_backend_rust::config::Config;
use hanzi_backend_rust::db::config::StoreConfig;
use hanzi_backend_rust::db::HanziStore;
use hanzi_backend_rust::logging::LogSettings;
use hanzi_backend_rust::state::AppState;

pub const DAY_MS: i64 = 86_400_000;

pub const WORDS_JSON: &str = r#"[
  {"id": "1", "char": "人", "lesson": 1},
  {"id": "2", "char": "口", "lesson": 1},
  {"id": "3", "char": "手", "lesson": 1},
  {"id": "1", "char": "日", "lesson": 2},
  {"id": "2", "char": "月", "lesson": 2},
  {"id": "3", "char": "水", "lesson": 2},
  {"id": "4", "char": "火", "lesson": 2},
  {"id": "5", "char": "山", "lesson": 2},
  {"id": "6", "char": "石", "lesson": 2}
]"#;

pub const LESSONS_JSON: &str = r#"[{"lesson": 1, "title": "第一课"}, {"lesson": 2, "title": "第二课"}]"#;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub dir: TempDir,
}

pub fn write_fixtures(dir: &Path) {
    let data_dir = dir.join("data");
    std::fs::create_dir_all(&data_dir).expect("create data dir");
    std::fs::write(data_dir.join("word.json"), WORDS_JSON).expect("write word.json");
    std::fs::write(data_dir.join("lesson_index.json"), LESSONS_JSON).expect("write lesson index");
    std::fs::write(dir.join("index.html"), "<html><body>汉字学习</body></html>").expect("write index");
}

pub fn test_config(dir: &Path) -> Config {
    Config {
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        log: LogSettings {
            level: "warn".to_string(),
            file_enabled: false,
            dir: dir.join("logs"),
        },
        data_dir: dir.join("data"),
        static_dir: dir.to_path_buf(),
        store: StoreConfig::at(dir.join("hanzi.db")),
        scheduler: SchedulerParams::default(),
    }
}

pub async fn create_test_app() -> TestApp {
    let dir = TempDir::new().expect("failed to create temp dir");
    write_fixtures(dir.path());
    let config = test_config(dir.path());

    let store = HanziStore::open_in_memory().await.expect("open store");
    let state = AppState::with_store(&config, store);
    let app = build_app(state.clone());

    TestApp { app, state, dir }
}

pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis() as i64
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}
