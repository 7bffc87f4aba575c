use axum::extract::State;
use axum::response::Response;

use crate::response::{ok, AppError};
use crate::state::AppState;

/// 清除所有学习数据
pub async fn reset(State(state): State<AppState>) -> Result<Response, AppError> {
    state.learning().reset().await?;
    Ok(ok(serde_json::json!({ "cleared": true })))
}
