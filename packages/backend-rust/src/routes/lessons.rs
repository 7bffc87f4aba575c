use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;

use crate::response::{ok, AppError};
use crate::routes::now_ms;
use crate::state::AppState;

pub async fn completed(State(state): State<AppState>) -> Result<Response, AppError> {
    let lessons = state.store().completed_lessons().await?;
    Ok(ok(lessons))
}

pub async fn learn(
    State(state): State<AppState>,
    lesson: Result<Path<u32>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(lesson) = lesson?;
    let outcome = state.learning().learn_lesson(lesson, now_ms()).await?;
    Ok(ok(outcome))
}
