use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use study_core::Clock;
use study_core::model::{CardId, FeedbackEvent, FeedbackLabel};
use study_core::session::{
    ApplyOutcome, LearningBatch, LearningParams, LearningSession, LearningState, LoadFailure,
    LoadRequest, LoadTarget, LoadTicket,
};

use crate::api::ContentApi;
use crate::error::{ApiError, LearningError};
use crate::learning::FeedbackSink;
use crate::session_context::SessionContext;

/// Drives the load → display → feedback → advance loop for one learning page.
///
/// The session lock is only held for the synchronous transitions, never
/// across a request, so several loads can be in flight at once. Each
/// response is applied only if it answers the most recently issued load.
pub struct LearningController {
    api: Arc<dyn ContentApi>,
    feedback: Arc<dyn FeedbackSink>,
    session_ctx: SessionContext,
    clock: Clock,
    session: Mutex<LearningSession>,
}

impl LearningController {
    #[must_use]
    pub fn new(
        params: LearningParams,
        api: Arc<dyn ContentApi>,
        feedback: Arc<dyn FeedbackSink>,
        session_ctx: SessionContext,
        clock: Clock,
    ) -> Self {
        Self {
            api,
            feedback,
            session_ctx,
            clock,
            session: Mutex::new(LearningSession::new(params)),
        }
    }

    fn session(&self) -> MutexGuard<'_, LearningSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state for rendering.
    #[must_use]
    pub fn state(&self) -> LearningState {
        self.session().state().clone()
    }

    #[must_use]
    pub fn params(&self) -> LearningParams {
        self.session().params().clone()
    }

    /// Initial load when the page mounts; specific when `card_id` is given.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Load` if the applied response was a failure.
    pub async fn start(&self, card_id: Option<CardId>) -> Result<ApplyOutcome, LearningError> {
        let request = self.session().mount(LoadTarget::from_card(card_id));
        self.execute(request).await
    }

    /// One load against the endpoint chosen by `target`.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Load` if the applied response was a failure.
    pub async fn load(&self, target: LoadTarget) -> Result<ApplyOutcome, LearningError> {
        let request = self.session().begin_load(target);
        self.execute(request).await
    }

    /// Navigation parameters changed (deck, rank, mode, or target card).
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Load` if the applied response was a failure.
    pub async fn change_params(
        &self,
        params: LearningParams,
        card_id: Option<CardId>,
    ) -> Result<ApplyOutcome, LearningError> {
        let request = self.session().change_params(params, card_id);
        self.execute(request).await
    }

    /// Records feedback for the card on screen, then advances with a random load.
    ///
    /// A recording failure is logged and does not stop the advance.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Session` when no card is loaded, or
    /// `LearningError::Load` if the follow-up load fails.
    pub async fn submit_feedback(
        &self,
        label: FeedbackLabel,
    ) -> Result<ApplyOutcome, LearningError> {
        let now = self.clock.now();
        let (event, request) = self.session().submit_feedback(label, now)?;
        self.record(&event).await;
        self.execute(request).await
    }

    /// Loads a recommended card in specific mode for exactly one load.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Session` when the card is not recommended, or
    /// `LearningError::Load` if the load fails.
    pub async fn select_recommended(
        &self,
        card_id: CardId,
    ) -> Result<ApplyOutcome, LearningError> {
        let request = self.session().select_recommended(card_id)?;
        self.execute(request).await
    }

    /// User-initiated retry of the last load.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Load` if the applied response was a failure.
    pub async fn retry(&self) -> Result<ApplyOutcome, LearningError> {
        let request = self.session().retry();
        self.execute(request).await
    }

    async fn record(&self, event: &FeedbackEvent) {
        if let Err(err) = self.feedback.record(event).await {
            log::warn!(
                "failed to record {} feedback for card {}: {err}",
                event.label,
                event.card_id
            );
        }
    }

    async fn execute(&self, request: LoadRequest) -> Result<ApplyOutcome, LearningError> {
        let ticket = request.ticket;
        log::debug!(
            "load #{} {:?} deck={} rank={} mode={}",
            ticket.value(),
            request.target,
            request.params.deck_id,
            request.params.rank_name,
            request.params.mode
        );

        let (outcome, error) = match self.fetch(&request).await {
            Ok(batch) => (self.apply(ticket, Ok(batch)), None),
            Err(err) => (self.apply(ticket, Err(err.failure())), Some(err)),
        };

        match (outcome, error) {
            (ApplyOutcome::Superseded, _) => {
                log::debug!("dropped superseded response for load #{}", ticket.value());
                Ok(ApplyOutcome::Superseded)
            }
            (ApplyOutcome::Applied, Some(err)) => {
                log::warn!("load #{} failed: {err}", ticket.value());
                Err(LearningError::Load(err))
            }
            (ApplyOutcome::Applied, None) => Ok(ApplyOutcome::Applied),
        }
    }

    fn apply(
        &self,
        ticket: LoadTicket,
        outcome: Result<LearningBatch, LoadFailure>,
    ) -> ApplyOutcome {
        self.session().apply(ticket, outcome)
    }

    async fn fetch(&self, request: &LoadRequest) -> Result<LearningBatch, ApiError> {
        let token = self.session_ctx.access_token().await?;
        match &request.target {
            LoadTarget::Random => self.api.random_card(&token, &request.params).await,
            LoadTarget::Specific(card_id) => {
                self.api
                    .specific_card(&token, card_id, &request.params)
                    .await
            }
        }
    }
}
