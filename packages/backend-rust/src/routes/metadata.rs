use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::AppError;
use crate::state::AppState;

/// 获取汉字数据
pub async fn words(State(state): State<AppState>) -> Result<Response, AppError> {
    let doc = state.catalog().words_json().await?;
    Ok(Json(doc).into_response())
}

/// 获取课程索引
pub async fn lessons(State(state): State<AppState>) -> Result<Response, AppError> {
    let doc = state.catalog().lessons_json().await?;
    Ok(Json(doc).into_response())
}
