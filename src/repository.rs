//! Cycle storage.
//!
//! The store is append-only: cycles are logged and listed, never edited or
//! removed. Handlers only see the [`CycleRepository`] trait so the service
//! can run against Postgres or a plain in-memory list.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{CycleRecord, NewCycle};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// All cycles logged by `user_id`, in no particular order.
    async fn list_cycles(&self, user_id: Uuid) -> Result<Vec<CycleRecord>, RepoError>;

    /// Persist a cycle. Callers validate the date range first.
    async fn save_cycle(&self, cycle: &NewCycle) -> Result<CycleRecord, RepoError>;
}

pub struct PgCycleRepository {
    pool: PgPool,
}

impl PgCycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CycleRepository for PgCycleRepository {
    async fn list_cycles(&self, user_id: Uuid) -> Result<Vec<CycleRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CycleRecord>(
            "SELECT id, user_id, start_date, end_date, created_at FROM cycles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn save_cycle(&self, cycle: &NewCycle) -> Result<CycleRecord, RepoError> {
        let record = sqlx::query_as::<_, CycleRecord>(
            "INSERT INTO cycles (user_id, start_date, end_date)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, start_date, end_date, created_at",
        )
        .bind(cycle.user_id)
        .bind(cycle.start_date)
        .bind(cycle.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                tracing::error!("❌ DB insert failed: {}", db_err.message());

                if let Some(code) = db_err.code() {
                    tracing::info!("ℹ️ SQLSTATE code: {}", code);
                }

                if let Some(constraint) = db_err.constraint() {
                    tracing::info!("🔒 Constraint violated: {}", constraint);
                }
            }
            e
        })?;

        Ok(record)
    }
}

#[derive(Default)]
pub struct InMemoryCycleRepository {
    cycles: RwLock<Vec<CycleRecord>>,
}

impl InMemoryCycleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CycleRepository for InMemoryCycleRepository {
    async fn list_cycles(&self, user_id: Uuid) -> Result<Vec<CycleRecord>, RepoError> {
        let cycles = self.cycles.read().await;
        Ok(cycles.iter().filter(|c| c.user_id == user_id).cloned().collect())
    }

    async fn save_cycle(&self, cycle: &NewCycle) -> Result<CycleRecord, RepoError> {
        let record = CycleRecord {
            id: Uuid::new_v4(),
            user_id: cycle.user_id,
            start_date: cycle.start_date,
            end_date: cycle.end_date,
            created_at: Utc::now(),
        };
        self.cycles.write().await.push(record.clone());
        Ok(record)
    }
}
