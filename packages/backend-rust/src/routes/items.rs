use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::response::{ok, AppError};
use crate::routes::now_ms;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    lesson: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    correct: bool,
    /// Answer time in epoch ms; server time when absent
    ts: Option<i64>,
}

pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let items = match query.lesson {
        Some(lesson) => state.store().items_by_lesson(lesson).await?,
        None => state.store().load_all_items().await?,
    };
    Ok(ok(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let item = state
        .store()
        .get_item(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("记录不存在: {id}")))?;
    Ok(ok(item))
}

pub async fn answer(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let ts = body.ts.unwrap_or_else(now_ms);
    if ts < 0 {
        return Err(AppError::validation("ts 不能为负数"));
    }
    let item = state.learning().record_answer(&id, body.correct, ts).await?;
    Ok(ok(item))
}
