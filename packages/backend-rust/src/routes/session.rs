use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use hanzi_algo::{HanziItem, SelectionSource, SessionPlan};
use serde::{Deserialize, Serialize};

use crate::response::{ok, AppError};
use crate::routes::now_ms;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Defaults to the highest completed lesson
    current_lesson: Option<u32>,
    now: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionQuestion {
    #[serde(flatten)]
    item: HanziItem,
    source: SelectionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    forget_prob: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    current_lesson: Option<u32>,
    now: i64,
    questions: Vec<SessionQuestion>,
    mandatory_total: usize,
    dropped_mandatory: usize,
}

impl SessionResponse {
    fn from_plan(plan: SessionPlan, lesson: Option<u32>) -> Self {
        Self {
            current_lesson: lesson,
            now: plan.now_ms,
            mandatory_total: plan.mandatory_total,
            dropped_mandatory: plan.dropped_mandatory,
            questions: plan
                .entries
                .into_iter()
                .map(|e| SessionQuestion {
                    item: e.item,
                    source: e.source,
                    forget_prob: e.forget_prob,
                })
                .collect(),
        }
    }
}

/// 选出本次测试的题目
pub async fn plan(
    State(state): State<AppState>,
    body: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;
    let now = body.now.unwrap_or_else(now_ms);

    let session = state
        .learning()
        .start_session(body.current_lesson, now)
        .await?;

    Ok(ok(SessionResponse::from_plan(session.plan, session.lesson)))
}
