use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{CacheError, SummaryCache};
use crate::domain::{ContentId, SummaryResult};

pub struct PgSummaryCache {
    pool: PgPool,
}

impl PgSummaryCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryCache for PgSummaryCache {
    #[instrument(skip(self), fields(content_id = %content_id))]
    async fn get(&self, content_id: &ContentId) -> Result<Option<SummaryResult>, CacheError> {
        let row = sqlx::query(
            r#"
            SELECT content_id, summary_text, created_at
            FROM summaries
            WHERE content_id = $1
            "#,
        )
        .bind(content_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored_id: String = row
            .try_get("content_id")
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        let summary_text: String = row
            .try_get("summary_text")
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(Some(SummaryResult {
            content_id: ContentId::parse(stored_id)
                .map_err(|e| CacheError::Unavailable(e.to_string()))?,
            summary_text,
            created_at,
        }))
    }

    #[instrument(skip(self, result), fields(content_id = %result.content_id))]
    async fn put(&self, result: &SummaryResult) -> Result<(), CacheError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO summaries (content_id, summary_text, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (content_id) DO NOTHING
            "#,
        )
        .bind(result.content_id.as_str())
        .bind(&result.summary_text)
        .bind(result.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        if inserted.rows_affected() == 0 {
            return Err(CacheError::AlreadyExists(result.content_id.clone()));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(content_id = %content_id))]
    async fn clear(&self, content_id: &ContentId) -> Result<bool, CacheError> {
        let deleted = sqlx::query("DELETE FROM summaries WHERE content_id = $1")
            .bind(content_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(deleted.rows_affected() > 0)
    }
}
