use std::sync::Arc;

use study_core::model::DeckRecommendation;

use crate::api::ContentApi;
use crate::error::ApiError;
use crate::session_context::SessionContext;

/// Number of deck recommendations the home page asks for.
pub const RECOMMENDATION_LIMIT: u32 = 3;

#[derive(Clone)]
pub struct HomeService {
    api: Arc<dyn ContentApi>,
    session: SessionContext,
}

impl HomeService {
    #[must_use]
    pub fn new(api: Arc<dyn ContentApi>, session: SessionContext) -> Self {
        Self { api, session }
    }

    /// Deck recommendations for the signed-in user, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotSignedIn` without a stored token, or the
    /// backend failure otherwise.
    pub async fn recommendations(&self, limit: u32) -> Result<Vec<DeckRecommendation>, ApiError> {
        let token = self.session.access_token().await?;
        let mut decks = self.api.deck_recommendations(&token, limit).await?;
        decks.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(decks)
    }
}
