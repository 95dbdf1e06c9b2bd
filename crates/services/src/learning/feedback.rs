use std::sync::Arc;

use async_trait::async_trait;
use storage::{FeedbackLogRepository, StorageError};
use study_core::model::FeedbackEvent;

/// Destination for submitted feedback.
///
/// No backend endpoint accepts feedback yet, so events are kept in the
/// local feedback log.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the event cannot be recorded.
    async fn record(&self, event: &FeedbackEvent) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct StoredFeedbackSink {
    log: Arc<dyn FeedbackLogRepository>,
}

impl StoredFeedbackSink {
    #[must_use]
    pub fn new(log: Arc<dyn FeedbackLogRepository>) -> Self {
        Self { log }
    }
}

#[async_trait]
impl FeedbackSink for StoredFeedbackSink {
    async fn record(&self, event: &FeedbackEvent) -> Result<(), StorageError> {
        let id = self.log.append_feedback(event).await?;
        log::debug!(
            "recorded feedback #{id}: {} for card {}",
            event.label,
            event.card_id
        );
        Ok(())
    }
}
