//! Learning-session state machine.
//!
//! Every user action maps to one transition that returns the request the
//! caller must execute. Responses are applied through [`LearningSession::apply`],
//! which drops anything that is not the answer to the latest request, so a slow
//! stale response can never overwrite a newer state.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

use crate::Error;
use crate::model::{Card, CardId, DeckId, FeedbackEvent, FeedbackLabel, RankName, StudyMode};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Transition requested in a state that does not allow it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no card is loaded")]
    NotReady,
    #[error("card {0} is not among the recommended cards")]
    UnknownRecommendation(CardId),
}

/// A response batch that violates the per-batch invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("card {0} appears more than once in the response")]
    DuplicateCard(CardId),
}

//
// ─── REQUESTS ─────────────────────────────────────────────────────────────────
//

/// Parameters that identify what is being studied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningParams {
    pub deck_id: DeckId,
    pub rank_name: RankName,
    pub mode: StudyMode,
}

impl LearningParams {
    #[must_use]
    pub fn new(deck_id: DeckId, rank_name: RankName, mode: StudyMode) -> Self {
        Self {
            deck_id,
            rank_name,
            mode,
        }
    }

    /// Parses navigation query values; an absent mode means `THREE_DAY`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Id` for a blank deck or rank, `Error::Mode` for an unknown mode.
    pub fn from_query(deck_id: &str, rank_name: &str, mode: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            deck_id: deck_id.parse()?,
            rank_name: rank_name.parse()?,
            mode: StudyMode::from_query(mode)?,
        })
    }
}

/// Which endpoint a load goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    /// Free study: the backend picks the next card.
    Random,
    /// Deep link to one card, e.g. from a recommendation.
    Specific(CardId),
}

impl LoadTarget {
    #[must_use]
    pub fn from_card(card_id: Option<CardId>) -> Self {
        card_id.map_or(LoadTarget::Random, LoadTarget::Specific)
    }
}

/// Sequence number of an issued load. Larger is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A load the caller must perform, tagged with its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub params: LearningParams,
    pub target: LoadTarget,
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// One successful learning response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningBatch {
    main_card: Card,
    recommended: Vec<Card>,
    remaining: u32,
}

impl LearningBatch {
    /// Builds a batch, enforcing that card ids are unique within it.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::DuplicateCard` if an id appears twice.
    pub fn new(main_card: Card, recommended: Vec<Card>, remaining: u32) -> Result<Self, BatchError> {
        let mut seen = HashSet::with_capacity(recommended.len() + 1);
        seen.insert(main_card.id.clone());
        for card in &recommended {
            if !seen.insert(card.id.clone()) {
                return Err(BatchError::DuplicateCard(card.id.clone()));
            }
        }
        Ok(Self {
            main_card,
            recommended,
            remaining,
        })
    }

    #[must_use]
    pub fn main_card(&self) -> &Card {
        &self.main_card
    }

    #[must_use]
    pub fn recommended(&self) -> &[Card] {
        &self.recommended
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn recommends(&self, card_id: &CardId) -> bool {
        self.recommended.iter().any(|card| &card.id == card_id)
    }
}

/// Why a load failed, as far as the view is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    Network,
    Auth,
    NotFound,
    InvalidResponse,
    SignedOut,
    /// Client storage could not be read while signed in.
    LocalStorage,
}

impl LoadFailure {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            LoadFailure::Network => "Could not reach the server. Please try again.",
            LoadFailure::Auth => "Your session was rejected. Please log in again.",
            LoadFailure::NotFound => "No card is available for this deck.",
            LoadFailure::InvalidResponse => "The server sent an unexpected response.",
            LoadFailure::SignedOut => "Please log in to study.",
            LoadFailure::LocalStorage => "Could not read saved data. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearningState {
    Idle,
    Loading,
    Ready(LearningBatch),
    Error(LoadFailure),
}

impl LearningState {
    #[must_use]
    pub fn batch(&self) -> Option<&LearningBatch> {
        match self {
            LearningState::Ready(batch) => Some(batch),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LearningState::Loading)
    }
}

/// Result of feeding a response into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Superseded,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct LearningSession {
    params: LearningParams,
    state: LearningState,
    last_target: LoadTarget,
    issued: u64,
}

impl LearningSession {
    #[must_use]
    pub fn new(params: LearningParams) -> Self {
        Self {
            params,
            state: LearningState::Idle,
            last_target: LoadTarget::Random,
            issued: 0,
        }
    }

    #[must_use]
    pub fn params(&self) -> &LearningParams {
        &self.params
    }

    #[must_use]
    pub fn state(&self) -> &LearningState {
        &self.state
    }

    /// Ticket of the most recently issued request, if any.
    #[must_use]
    pub fn latest_ticket(&self) -> Option<LoadTicket> {
        (self.issued > 0).then_some(LoadTicket(self.issued))
    }

    /// Initial load when the page mounts.
    pub fn mount(&mut self, target: LoadTarget) -> LoadRequest {
        self.begin_load(target)
    }

    /// Enters `Loading` and issues a new request for `target`.
    pub fn begin_load(&mut self, target: LoadTarget) -> LoadRequest {
        self.issued += 1;
        self.state = LearningState::Loading;
        self.last_target = target.clone();
        LoadRequest {
            ticket: LoadTicket(self.issued),
            params: self.params.clone(),
            target,
        }
    }

    /// Navigation parameters changed; reload with the new ones.
    pub fn change_params(&mut self, params: LearningParams, card_id: Option<CardId>) -> LoadRequest {
        self.params = params;
        self.begin_load(LoadTarget::from_card(card_id))
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Failures clear any previously displayed card.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<LearningBatch, LoadFailure>,
    ) -> ApplyOutcome {
        if ticket.0 != self.issued {
            return ApplyOutcome::Superseded;
        }
        self.state = match outcome {
            Ok(batch) => LearningState::Ready(batch),
            Err(failure) => LearningState::Error(failure),
        };
        ApplyOutcome::Applied
    }

    /// Records feedback for the main card and advances with a random load.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReady` unless a card is loaded.
    pub fn submit_feedback(
        &mut self,
        label: FeedbackLabel,
        at: DateTime<Utc>,
    ) -> Result<(FeedbackEvent, LoadRequest), SessionError> {
        let batch = self.state.batch().ok_or(SessionError::NotReady)?;
        let event = FeedbackEvent {
            card_id: batch.main_card().id.clone(),
            deck_id: self.params.deck_id.clone(),
            rank_name: self.params.rank_name.clone(),
            mode: self.params.mode,
            label,
            recorded_at: at,
        };
        let request = self.begin_load(LoadTarget::Random);
        Ok((event, request))
    }

    /// Switches to one specific-card load for a recommended card.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReady` unless a card is loaded, and
    /// `SessionError::UnknownRecommendation` if `card_id` is not recommended.
    pub fn select_recommended(&mut self, card_id: CardId) -> Result<LoadRequest, SessionError> {
        let batch = self.state.batch().ok_or(SessionError::NotReady)?;
        if !batch.recommends(&card_id) {
            return Err(SessionError::UnknownRecommendation(card_id));
        }
        Ok(self.begin_load(LoadTarget::Specific(card_id)))
    }

    /// User-initiated re-trigger of the last load.
    pub fn retry(&mut self) -> LoadRequest {
        let target = self.last_target.clone();
        self.begin_load(target)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
