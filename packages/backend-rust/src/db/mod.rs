//! SQLite 本地存储
//!
//! `HanziStore` is the explicitly constructed storage client: it is opened from
//! a [`StoreConfig`], shared through `AppState`, and closed on shutdown. Every
//! operation is a single async request returning `Result<_, StoreError>`.

pub mod config;
pub mod operations;
pub mod sqlite_schema;

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::db::config::StoreConfig;
use crate::db::sqlite_schema::run_migrations;

/// 存储模块错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("数据库错误: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("文件错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("数据未找到: {0}")]
    NotFound(String),

    #[error("数据格式错误: {0}")]
    InvalidRecord(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone)]
pub struct HanziStore {
    pool: SqlitePool,
    /// Serializes read-modify-write sequences such as applying an answer.
    write_lock: Arc<Mutex<()>>,
}

impl HanziStore {
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db_url = format!("sqlite:{}?mode=rwc", config.path.display());
        let options = SqliteConnectOptions::from_str(&db_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(path = %config.path.display(), "sqlite store opened");
        Self::from_pool(pool).await
    }

    /// Private in-memory database; one connection so every query sees the same data.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        run_migrations(&pool).await?;
        Ok(Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("sqlite store closed");
    }

    /// 清除所有学习数据
    pub async fn clear_all(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        sqlx::query(r#"DELETE FROM "hanzi_items""#)
            .execute(&mut *tx)
            .await?;
        sqlx::query(r#"DELETE FROM "completed_lessons""#)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!("all learning data cleared");
        Ok(())
    }

    pub(crate) fn write_lock(&self) -> &Mutex<()> {
        &self.write_lock
    }
}
