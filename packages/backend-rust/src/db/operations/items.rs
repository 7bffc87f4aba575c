use hanzi_algo::{update_after_answer, HanziItem, ReviewRecord};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};

use crate::db::{HanziStore, StoreError, StoreResult};

const SELECT_ITEM_COLUMNS: &str = r#"SELECT "id", "char", "lesson", "last_ts", "stability_days", "ease", "history" FROM "hanzi_items""#;

/// Natural key of an item: `"{lesson}_{localId}"`
pub fn item_key(lesson: u32, local_id: &str) -> String {
    format!("{lesson}_{local_id}")
}

impl HanziStore {
    /// 获取所有汉字记录，按课次与插入顺序排列
    pub async fn load_all_items(&self) -> StoreResult<Vec<HanziItem>> {
        let sql = format!(r#"{SELECT_ITEM_COLUMNS} ORDER BY "lesson", "rowid""#);
        let rows = sqlx::query(&sql).fetch_all(self.pool()).await?;
        rows.iter().map(row_to_item).collect()
    }

    pub async fn get_item(&self, id: &str) -> StoreResult<Option<HanziItem>> {
        let sql = format!(r#"{SELECT_ITEM_COLUMNS} WHERE "id" = ? LIMIT 1"#);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(row_to_item).transpose()
    }

    /// 获取指定课程的汉字记录
    pub async fn items_by_lesson(&self, lesson: u32) -> StoreResult<Vec<HanziItem>> {
        let sql = format!(r#"{SELECT_ITEM_COLUMNS} WHERE "lesson" = ? ORDER BY "rowid""#);
        let rows = sqlx::query(&sql)
            .bind(i64::from(lesson))
            .fetch_all(self.pool())
            .await?;
        rows.iter().map(row_to_item).collect()
    }

    pub async fn save_item(&self, item: &HanziItem) -> StoreResult<()> {
        let _guard = self.write_lock().lock().await;
        upsert_item(self.pool(), item).await
    }

    pub async fn bulk_save(&self, items: &[HanziItem]) -> StoreResult<()> {
        let _guard = self.write_lock().lock().await;
        let mut tx = self.pool().begin().await?;
        for item in items {
            upsert_item(&mut *tx, item).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete_item(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.write_lock().lock().await;
        let result = sqlx::query(r#"DELETE FROM "hanzi_items" WHERE "id" = ?"#)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// 创建汉字学习记录，视为此刻已学过
    ///
    /// Insert-only: an item that already exists keeps its memory state and
    /// `None` is returned.
    pub async fn create_item(
        &self,
        local_id: &str,
        character: &str,
        lesson: u32,
        now_ms: i64,
    ) -> StoreResult<Option<HanziItem>> {
        let item = HanziItem {
            id: item_key(lesson, local_id),
            character: character.to_string(),
            lesson,
            last_ts: Some(now_ms),
            stability_days: Some(hanzi_algo::DEFAULT_STABILITY_DAYS),
            ease: Some(hanzi_algo::DEFAULT_EASE),
            history: Vec::new(),
        };
        let _guard = self.write_lock().lock().await;
        let result = sqlx::query(
            r#"
            INSERT INTO "hanzi_items" ("id", "char", "lesson", "last_ts", "stability_days", "ease", "history")
            VALUES (?, ?, ?, ?, ?, ?, '[]')
            ON CONFLICT ("id") DO NOTHING
            "#,
        )
        .bind(&item.id)
        .bind(&item.character)
        .bind(i64::from(item.lesson))
        .bind(item.last_ts)
        .bind(item.stability_days)
        .bind(item.ease)
        .execute(self.pool())
        .await?;

        Ok((result.rows_affected() > 0).then_some(item))
    }

    /// Reads, updates and writes one item as a single transaction.
    pub async fn apply_answer(&self, id: &str, correct: bool, now_ms: i64) -> StoreResult<HanziItem> {
        let _guard = self.write_lock().lock().await;
        let mut tx = self.pool().begin().await?;

        let sql = format!(r#"{SELECT_ITEM_COLUMNS} WHERE "id" = ? LIMIT 1"#);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        let mut item = row_to_item(&row)?;
        update_after_answer(&mut item, correct, now_ms);
        upsert_item(&mut *tx, &item).await?;
        tx.commit().await?;

        tracing::debug!(
            id,
            correct,
            stability_days = item.stability(),
            ease = item.ease_factor(),
            "answer applied"
        );
        Ok(item)
    }
}

async fn upsert_item<'e, E>(executor: E, item: &HanziItem) -> StoreResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let history = serde_json::to_string(&item.history)?;
    sqlx::query(
        r#"
        INSERT INTO "hanzi_items" ("id", "char", "lesson", "last_ts", "stability_days", "ease", "history")
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT ("id") DO UPDATE SET
            "char" = excluded."char",
            "lesson" = excluded."lesson",
            "last_ts" = excluded."last_ts",
            "stability_days" = excluded."stability_days",
            "ease" = excluded."ease",
            "history" = excluded."history"
        "#,
    )
    .bind(&item.id)
    .bind(&item.character)
    .bind(i64::from(item.lesson))
    .bind(item.last_ts)
    .bind(item.stability_days)
    .bind(item.ease)
    .bind(history)
    .execute(executor)
    .await?;
    Ok(())
}

fn row_to_item(row: &SqliteRow) -> StoreResult<HanziItem> {
    let id: String = row.try_get("id")?;
    let lesson: i64 = row.try_get("lesson")?;
    let lesson = u32::try_from(lesson)
        .map_err(|_| StoreError::InvalidRecord(format!("{id}: lesson {lesson}")))?;
    let history_raw: String = row.try_get("history")?;
    let history: Vec<ReviewRecord> = serde_json::from_str(&history_raw)?;

    Ok(HanziItem {
        character: row.try_get("char")?,
        lesson,
        last_ts: row.try_get("last_ts")?,
        stability_days: row.try_get("stability_days")?,
        ease: row.try_get("ease")?,
        history,
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key() {
        assert_eq!(item_key(3, "12"), "3_12");
    }
}
