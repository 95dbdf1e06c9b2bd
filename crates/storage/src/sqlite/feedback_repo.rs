use async_trait::async_trait;
use study_core::model::FeedbackEvent;

use super::{SqliteRepository, mapping::map_feedback_row};
use crate::repository::{FeedbackLogEntry, FeedbackLogRepository, StorageError};

#[async_trait]
impl FeedbackLogRepository for SqliteRepository {
    async fn append_feedback(&self, event: &FeedbackEvent) -> Result<i64, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO feedback_events (
                    card_id, deck_id, rank_name, mode, label, recorded_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(event.card_id.as_str())
        .bind(event.deck_id.as_str())
        .bind(event.rank_name.as_str())
        .bind(event.mode.as_str())
        .bind(event.label.as_str())
        .bind(event.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(res.last_insert_rowid())
    }

    async fn recent_feedback(&self, limit: u32) -> Result<Vec<FeedbackLogEntry>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, card_id, deck_id, rank_name, mode, label, recorded_at
                FROM feedback_events
                ORDER BY id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_feedback_row(&row)?);
        }
        Ok(out)
    }
}
