mod data;
mod health;
mod items;
mod lessons;
mod metadata;
mod session;

use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let static_files =
        ServeDir::new(state.static_dir()).not_found_service(fallback_handler.into_service());

    Router::new()
        .nest("/health", health::router())
        .route("/api/words", get(metadata::words))
        .route("/api/lessons", get(metadata::lessons))
        .route("/api/lessons/completed", get(lessons::completed))
        .route("/api/lessons/:lesson/learn", post(lessons::learn))
        .route("/api/items", get(items::list_items))
        .route("/api/items/:id", get(items::get_item))
        .route("/api/items/:id/answer", post(items::answer))
        .route("/api/session", post(session::plan))
        .route("/api/data", delete(data::reset))
        .fallback_service(static_files)
        .with_state(state)
}

pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "页面未找到").into_response()
}
