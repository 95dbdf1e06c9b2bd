use async_trait::async_trait;
use study_core::model::FeedbackEvent;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted feedback event with its log id.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackLogEntry {
    pub id: i64,
    pub event: FeedbackEvent,
}

/// String key/value storage local to this client.
///
/// Semantics follow browser local storage: last write wins and removing a
/// missing key is not an error.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Append-only log of submitted feedback.
#[async_trait]
pub trait FeedbackLogRepository: Send + Sync {
    /// Append a feedback event and return its log id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the event cannot be stored.
    async fn append_feedback(&self, event: &FeedbackEvent) -> Result<i64, StorageError>;

    /// Most recent entries first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be read.
    async fn recent_feedback(&self, limit: u32) -> Result<Vec<FeedbackLogEntry>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    items: Arc<Mutex<HashMap<String, String>>>,
    feedback: Arc<Mutex<Vec<FeedbackLogEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStorage for InMemoryRepository {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[async_trait]
impl FeedbackLogRepository for InMemoryRepository {
    async fn append_feedback(&self, event: &FeedbackEvent) -> Result<i64, StorageError> {
        let mut guard = self
            .feedback
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = i64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("feedback id overflow".into()))?
            + 1;
        guard.push(FeedbackLogEntry {
            id,
            event: event.clone(),
        });
        Ok(id)
    }

    async fn recent_feedback(&self, limit: u32) -> Result<Vec<FeedbackLogEntry>, StorageError> {
        let guard = self
            .feedback
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub client: Arc<dyn ClientStorage>,
    pub feedback: Arc<dyn FeedbackLogRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let client: Arc<dyn ClientStorage> = Arc::new(repo.clone());
        let feedback: Arc<dyn FeedbackLogRepository> = Arc::new(repo);
        Self { client, feedback }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::{CardId, DeckId, FeedbackLabel, RankName, StudyMode};
    use study_core::time::fixed_now;

    fn event(card: &str, label: FeedbackLabel) -> FeedbackEvent {
        FeedbackEvent {
            card_id: CardId::new(card).unwrap(),
            deck_id: DeckId::new("d1").unwrap(),
            rank_name: RankName::new("gold").unwrap(),
            mode: StudyMode::ThreeDay,
            label,
            recorded_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn items_follow_last_write_wins() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_item("accessToken").await.unwrap(), None);

        repo.set_item("accessToken", "a1").await.unwrap();
        repo.set_item("accessToken", "a2").await.unwrap();
        assert_eq!(
            repo.get_item("accessToken").await.unwrap().as_deref(),
            Some("a2")
        );

        repo.remove_item("accessToken").await.unwrap();
        repo.remove_item("accessToken").await.unwrap();
        assert_eq!(repo.get_item("accessToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn feedback_is_listed_newest_first() {
        let repo = InMemoryRepository::new();
        repo.append_feedback(&event("c1", FeedbackLabel::Again))
            .await
            .unwrap();
        let second = repo
            .append_feedback(&event("c2", FeedbackLabel::Easy))
            .await
            .unwrap();

        let recent = repo.recent_feedback(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, second);
        assert_eq!(recent[0].event.label, FeedbackLabel::Easy);
    }
}
