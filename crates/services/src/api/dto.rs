use serde::Deserialize;
use study_core::model::Card;
use study_core::session::LearningBatch;

use crate::error::ApiError;

/// Body of both learning endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LearningResponse {
    main_card: Option<Card>,
    recommended_cards: Option<Vec<Card>>,
    total_remaining: u32,
}

impl LearningResponse {
    /// A missing main card means there is nothing to study.
    pub(crate) fn into_batch(self) -> Result<LearningBatch, ApiError> {
        let main_card = self.main_card.ok_or(ApiError::NotFound)?;
        LearningBatch::new(
            main_card,
            self.recommended_cards.unwrap_or_default(),
            self.total_remaining,
        )
        .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}
