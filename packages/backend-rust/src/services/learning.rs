//! Learning flow on top of the scheduler.
//!
//! Replaces a process-wide learning manager: the service is built from an
//! opened store and the catalog and handed to whoever needs it.

use std::sync::Arc;

use hanzi_algo::{plan_session_with, HanziItem, SchedulerParams, SessionPlan};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::db::{HanziStore, StoreError};
use crate::response::AppError;

#[derive(Error, Debug)]
pub enum LearningError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("课程 {0} 没有汉字")]
    EmptyLesson(u32),
}

impl From<LearningError> for AppError {
    fn from(err: LearningError) -> Self {
        match err {
            LearningError::Store(e) => e.into(),
            LearningError::Catalog(e) => e.into(),
            LearningError::EmptyLesson(lesson) => {
                AppError::not_found(format!("课程 {lesson} 没有汉字"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnOutcome {
    pub lesson: u32,
    pub created: usize,
    pub existing: usize,
}

/// A planned session and the lesson it was planned for
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub lesson: Option<u32>,
    pub plan: SessionPlan,
}

#[derive(Clone)]
pub struct LearningService {
    store: HanziStore,
    catalog: Arc<Catalog>,
    params: SchedulerParams,
}

impl LearningService {
    pub fn new(store: HanziStore, catalog: Arc<Catalog>, params: SchedulerParams) -> Self {
        Self {
            store,
            catalog,
            params,
        }
    }

    pub fn store(&self) -> &HanziStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn params(&self) -> &SchedulerParams {
        &self.params
    }

    /// Stores the lesson's words that are not tracked yet and marks it completed.
    pub async fn learn_lesson(&self, lesson: u32, now_ms: i64) -> Result<LearnOutcome, LearningError> {
        let words = self.catalog.words_in_lesson(lesson).await?;
        if words.is_empty() {
            return Err(LearningError::EmptyLesson(lesson));
        }

        let mut created = 0;
        for word in &words {
            let inserted = self
                .store
                .create_item(&word.id, &word.character, lesson, now_ms)
                .await?;
            if inserted.is_some() {
                created += 1;
            }
        }

        self.store.mark_lesson_completed(lesson, now_ms).await?;
        tracing::info!(lesson, created, total = words.len(), "lesson learned");

        Ok(LearnOutcome {
            lesson,
            created,
            existing: words.len() - created,
        })
    }

    /// Highest completed lesson
    pub async fn current_lesson(&self) -> Result<Option<u32>, LearningError> {
        let completed = self.store.completed_lessons().await?;
        Ok(completed.iter().map(|c| c.lesson_id).max())
    }

    /// Plans a session; without an explicit lesson the highest completed one is used.
    pub async fn start_session(
        &self,
        lesson: Option<u32>,
        now_ms: i64,
    ) -> Result<SessionStart, LearningError> {
        let lesson = match lesson {
            Some(lesson) => Some(lesson),
            None => self.current_lesson().await?,
        };
        let Some(lesson) = lesson else {
            tracing::info!("no lesson completed yet, empty session");
            return Ok(SessionStart {
                lesson: None,
                plan: SessionPlan {
                    now_ms,
                    ..SessionPlan::default()
                },
            });
        };

        let pool = self.store.load_all_items().await?;
        let plan = plan_session_with(&self.params, &pool, lesson, now_ms);

        if plan.dropped_mandatory > 0 {
            tracing::warn!(
                lesson,
                mandatory = plan.mandatory_total,
                dropped = plan.dropped_mandatory,
                "session cap dropped overdue items"
            );
        }
        tracing::info!(
            lesson,
            pool = pool.len(),
            selected = plan.len(),
            mandatory = plan.mandatory_total,
            "session planned"
        );
        Ok(SessionStart {
            lesson: Some(lesson),
            plan,
        })
    }

    pub async fn record_answer(
        &self,
        id: &str,
        correct: bool,
        now_ms: i64,
    ) -> Result<HanziItem, LearningError> {
        Ok(self.store.apply_answer(id, correct, now_ms).await?)
    }

    pub async fn reset(&self) -> Result<(), LearningError> {
        Ok(self.store.clear_all().await?)
    }
}
