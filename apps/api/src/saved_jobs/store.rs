//! Per-account job bookmarks.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::saved_job::{SavedJob, SavedJobData, SavedJobRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Job already saved")]
    AlreadySaved,

    #[error("Job not found in saved list")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadySaved => AppError::Conflict(e.to_string()),
            StoreError::NotFound => AppError::NotFound(e.to_string()),
            StoreError::Database(db) => AppError::Database(db),
        }
    }
}

#[async_trait]
pub trait SavedJobStore: Send + Sync {
    /// Bookmarks a job. Fails with [`StoreError::AlreadySaved`] if this
    /// account already saved a job with the same id.
    async fn save(&self, email: &str, job: SavedJobData) -> Result<SavedJob, StoreError>;

    /// Newest first.
    async fn list(&self, email: &str) -> Result<Vec<SavedJob>, StoreError>;

    async fn remove(&self, email: &str, job_id: &str) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgSavedJobStore {
    pool: PgPool,
}

impl PgSavedJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavedJobStore for PgSavedJobStore {
    async fn save(&self, email: &str, job: SavedJobData) -> Result<SavedJob, StoreError> {
        let row = sqlx::query_as::<_, SavedJobRow>(
            r#"
            INSERT INTO saved_jobs (id, email, job_id, job_data)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email, job_id) DO NOTHING
            RETURNING id, email, job_data, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(&job.id)
        .bind(Json(&job))
        .fetch_optional(&self.pool)
        .await?;

        row.map(SavedJob::from).ok_or(StoreError::AlreadySaved)
    }

    async fn list(&self, email: &str) -> Result<Vec<SavedJob>, StoreError> {
        let rows = sqlx::query_as::<_, SavedJobRow>(
            r#"
            SELECT id, email, job_data, created_at
            FROM saved_jobs
            WHERE email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SavedJob::from).collect())
    }

    async fn remove(&self, email: &str, job_id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE email = $1 AND job_id = $2")
            .bind(email)
            .bind(job_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Keeps bookmarks in insertion order, so reversed iteration is newest first.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySavedJobStore {
    jobs: std::sync::Mutex<Vec<SavedJob>>,
}

#[cfg(test)]
impl MemorySavedJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SavedJob>> {
        self.jobs.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
#[async_trait]
impl SavedJobStore for MemorySavedJobStore {
    async fn save(&self, email: &str, job: SavedJobData) -> Result<SavedJob, StoreError> {
        let mut jobs = self.lock();
        if jobs
            .iter()
            .any(|s| s.email == email && s.job_data.id == job.id)
        {
            return Err(StoreError::AlreadySaved);
        }
        let saved = SavedJob {
            id: Uuid::new_v4(),
            email: email.to_string(),
            job_data: job,
            created_at: chrono::Utc::now(),
        };
        jobs.push(saved.clone());
        Ok(saved)
    }

    async fn list(&self, email: &str) -> Result<Vec<SavedJob>, StoreError> {
        Ok(self
            .lock()
            .iter()
            .rev()
            .filter(|s| s.email == email)
            .cloned()
            .collect())
    }

    async fn remove(&self, email: &str, job_id: &str) -> Result<(), StoreError> {
        let mut jobs = self.lock();
        let index = jobs
            .iter()
            .position(|s| s.email == email && s.job_data.id == job_id)
            .ok_or(StoreError::NotFound)?;
        jobs.remove(index);
        Ok(())
    }
}
