use std::fmt;

use study_core::model::{Card, CardId, DeckId, FeedbackLabel, RankName, StudyMode};
use study_core::session::{LearningParams, LearningState};
use url::form_urlencoded;

use crate::views::ViewError;

/// Query string of the learning page: `deckId`, `rankName`, `mode`, `cardId`.
///
/// Values are kept raw so a malformed link still renders an error page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LearningQuery {
    pub deck_id: String,
    pub rank_name: String,
    pub mode: Option<String>,
    pub card_id: Option<String>,
}

impl LearningQuery {
    #[must_use]
    pub fn new(deck_id: &DeckId, rank_name: &RankName, mode: StudyMode) -> Self {
        Self {
            deck_id: deck_id.to_string(),
            rank_name: rank_name.to_string(),
            mode: Some(mode.as_str().to_string()),
            card_id: None,
        }
    }

    /// Same deck, rank and mode, targeting `card_id`.
    #[must_use]
    pub fn with_card(&self, card_id: &CardId) -> Self {
        Self {
            card_id: Some(card_id.to_string()),
            ..self.clone()
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::InvalidLink` when the deck or rank is missing or
    /// the mode is unknown.
    pub fn params(&self) -> Result<LearningParams, ViewError> {
        LearningParams::from_query(&self.deck_id, &self.rank_name, self.mode.as_deref())
            .map_err(|_| ViewError::InvalidLink)
    }

    /// Target card, if the link names one. Blank values mean random mode.
    #[must_use]
    pub fn target_card(&self) -> Option<CardId> {
        self.card_id
            .as_deref()
            .and_then(|raw| CardId::new(raw).ok())
    }
}

impl From<&str> for LearningQuery {
    fn from(query: &str) -> Self {
        let mut parsed = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "deckId" => parsed.deck_id = value.into_owned(),
                "rankName" => parsed.rank_name = value.into_owned(),
                "mode" => parsed.mode = Some(value.into_owned()),
                "cardId" => parsed.card_id = Some(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }
}

impl fmt::Display for LearningQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("deckId", &self.deck_id);
        if let Some(card_id) = &self.card_id {
            query.append_pair("cardId", card_id);
        }
        if let Some(mode) = &self.mode {
            query.append_pair("mode", mode);
        }
        query.append_pair("rankName", &self.rank_name);
        f.write_str(&query.finish())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendedCardVm {
    pub id: CardId,
    pub question: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearningCardVm {
    pub title: &'static str,
    pub question: String,
    pub answer: String,
    pub remaining: u32,
    pub recommended: Vec<RecommendedCardVm>,
}

/// What the learning page renders for a controller state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LearningScreen {
    Loading,
    Failed { message: &'static str },
    Card(LearningCardVm),
}

#[must_use]
pub fn map_learning_state(mode: StudyMode, state: &LearningState) -> LearningScreen {
    match state {
        LearningState::Idle | LearningState::Loading => LearningScreen::Loading,
        LearningState::Error(failure) => LearningScreen::Failed {
            message: failure.message(),
        },
        LearningState::Ready(batch) => LearningScreen::Card(LearningCardVm {
            title: mode.label(),
            question: batch.main_card().question.clone(),
            answer: batch.main_card().answer.clone(),
            remaining: batch.remaining(),
            recommended: batch.recommended().iter().map(recommended_card).collect(),
        }),
    }
}

fn recommended_card(card: &Card) -> RecommendedCardVm {
    RecommendedCardVm {
        id: card.id.clone(),
        question: card.question.clone(),
    }
}

/// CSS class of the feedback button for `label`.
#[must_use]
pub fn feedback_class(label: FeedbackLabel) -> &'static str {
    match label {
        FeedbackLabel::Again => "feedback-again",
        FeedbackLabel::Hard => "feedback-hard",
        FeedbackLabel::Good => "feedback-good",
        FeedbackLabel::Easy => "feedback-easy",
    }
}
