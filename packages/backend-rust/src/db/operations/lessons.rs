use serde::Serialize;
use sqlx::Row;

use crate::db::{HanziStore, StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedLesson {
    pub lesson_id: u32,
    pub completed_at: i64,
}

impl HanziStore {
    /// 标记课程为已完成
    pub async fn mark_lesson_completed(&self, lesson: u32, now_ms: i64) -> StoreResult<()> {
        let _guard = self.write_lock().lock().await;
        sqlx::query(
            r#"
            INSERT INTO "completed_lessons" ("lesson_id", "completed_at") VALUES (?, ?)
            ON CONFLICT ("lesson_id") DO UPDATE SET "completed_at" = excluded."completed_at"
            "#,
        )
        .bind(i64::from(lesson))
        .bind(now_ms)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn is_lesson_completed(&self, lesson: u32) -> StoreResult<bool> {
        let found: Option<i64> = sqlx::query_scalar(
            r#"SELECT "completed_at" FROM "completed_lessons" WHERE "lesson_id" = ?"#,
        )
        .bind(i64::from(lesson))
        .fetch_optional(self.pool())
        .await?;
        Ok(found.is_some())
    }

    /// 获取所有已完成的课程，按课次升序
    pub async fn completed_lessons(&self) -> StoreResult<Vec<CompletedLesson>> {
        let rows = sqlx::query(
            r#"SELECT "lesson_id", "completed_at" FROM "completed_lessons" ORDER BY "lesson_id""#,
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| -> StoreResult<CompletedLesson> {
                let lesson_id: i64 = row.try_get("lesson_id")?;
                let lesson_id = u32::try_from(lesson_id).map_err(|_| {
                    StoreError::InvalidRecord(format!("completed lesson {lesson_id}"))
                })?;
                Ok(CompletedLesson {
                    lesson_id,
                    completed_at: row.try_get("completed_at")?,
                })
            })
            .collect()
    }
}
