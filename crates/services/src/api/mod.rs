//! Contracts of the external Content API and Auth Gateway.

mod dto;
mod http;

use async_trait::async_trait;
use study_core::model::{AccessToken, AuthTokens, CardId, Credentials, DeckRecommendation};
use study_core::session::{LearningBatch, LearningParams};

use crate::error::ApiError;

pub use http::HttpBackend;

/// Serves learning cards and deck recommendations. Every call carries a bearer token.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// `GET /api/cards/learning/random`
    async fn random_card(
        &self,
        token: &AccessToken,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError>;

    /// `GET /api/cards/{cardId}/learning`
    async fn specific_card(
        &self,
        token: &AccessToken,
        card_id: &CardId,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError>;

    /// `GET /api/recommendations/decks`
    async fn deck_recommendations(
        &self,
        token: &AccessToken,
        limit: u32,
    ) -> Result<Vec<DeckRecommendation>, ApiError>;
}

/// Issues token pairs for username/password logins.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /login`
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError>;
}
