use chrono::{DateTime, Utc};
use sqlx::Row;
use study_core::model::{CardId, DeckId, FeedbackEvent, FeedbackLabel, RankName, StudyMode};

use crate::repository::{FeedbackLogEntry, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn map_feedback_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<FeedbackLogEntry, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let card_id: String = row.try_get("card_id").map_err(ser)?;
    let deck_id: String = row.try_get("deck_id").map_err(ser)?;
    let rank_name: String = row.try_get("rank_name").map_err(ser)?;
    let mode: String = row.try_get("mode").map_err(ser)?;
    let label: String = row.try_get("label").map_err(ser)?;
    let recorded_at: DateTime<Utc> = row.try_get("recorded_at").map_err(ser)?;

    Ok(FeedbackLogEntry {
        id,
        event: FeedbackEvent {
            card_id: CardId::new(card_id).map_err(ser)?,
            deck_id: DeckId::new(deck_id).map_err(ser)?,
            rank_name: RankName::new(rank_name).map_err(ser)?,
            mode: mode.parse::<StudyMode>().map_err(ser)?,
            label: label.parse::<FeedbackLabel>().map_err(ser)?,
            recorded_at,
        },
    })
}
