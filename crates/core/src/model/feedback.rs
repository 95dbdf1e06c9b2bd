use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{CardId, DeckId, RankName};
use crate::model::mode::StudyMode;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("invalid feedback label: {0}")]
    InvalidLabel(String),
}

//
// ─── FEEDBACK LABEL ───────────────────────────────────────────────────────────
//

/// Self-assessed recall difficulty for the card on screen.
///
/// The label is recorded but never alters control flow on the client;
/// scheduling is decided by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackLabel {
    Again,
    Hard,
    Good,
    Easy,
}

impl FeedbackLabel {
    /// Labels in the order they are offered to the user.
    pub const ALL: [FeedbackLabel; 4] = [
        FeedbackLabel::Again,
        FeedbackLabel::Hard,
        FeedbackLabel::Good,
        FeedbackLabel::Easy,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackLabel::Again => "Again",
            FeedbackLabel::Hard => "Hard",
            FeedbackLabel::Good => "Good",
            FeedbackLabel::Easy => "Easy",
        }
    }
}

impl fmt::Display for FeedbackLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackLabel {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedbackLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| FeedbackError::InvalidLabel(s.to_string()))
    }
}

//
// ─── FEEDBACK EVENT ───────────────────────────────────────────────────────────
//

/// A feedback submission for the main card of a loaded session.
///
/// Only `LearningSession::submit_feedback` creates these, which keeps the
/// "references a loaded main card" rule in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEvent {
    pub card_id: CardId,
    pub deck_id: DeckId,
    pub rank_name: RankName,
    pub mode: StudyMode,
    pub label: FeedbackLabel,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_strings() {
        for label in FeedbackLabel::ALL {
            assert_eq!(label.as_str().parse::<FeedbackLabel>().unwrap(), label);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Meh".parse::<FeedbackLabel>().unwrap_err();
        assert_eq!(err, FeedbackError::InvalidLabel("Meh".into()));
    }
}
