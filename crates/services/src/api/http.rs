use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use study_core::model::{AccessToken, AuthTokens, CardId, Credentials, DeckRecommendation};
use study_core::session::{LearningBatch, LearningParams, LoadTarget};
use url::Url;

use super::dto::LearningResponse;
use super::{AuthGateway, ContentApi};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// `reqwest`-backed implementation of the backend contracts.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build a backend with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Base URL extended with percent-encoded path segments.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base URL cannot have a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the learning endpoint for `target`, with the study query.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base URL cannot have a path.
    pub fn learning_url(
        &self,
        target: &LoadTarget,
        params: &LearningParams,
    ) -> Result<Url, ApiError> {
        let mut url = match target {
            LoadTarget::Random => self.endpoint(&["api", "cards", "learning", "random"])?,
            LoadTarget::Specific(card_id) => {
                self.endpoint(&["api", "cards", card_id.as_str(), "learning"])?
            }
        };
        url.query_pairs_mut()
            .append_pair("deckId", params.deck_id.as_str())
            .append_pair("mode", params.mode.as_str())
            .append_pair("rankName", params.rank_name.as_str());
        Ok(url)
    }

    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base URL cannot have a path.
    pub fn recommendations_url(&self, limit: u32) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["api", "recommendations", "decks"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    async fn get_learning(
        &self,
        token: &AccessToken,
        target: &LoadTarget,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError> {
        let url = self.learning_url(target, params)?;
        log::debug!("GET {}", url.path());
        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let body: LearningResponse = read_json(response).await?;
        body.into_batch()
    }
}

/// Maps the status first, then decodes the body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Auth {
            status,
            message: message.trim().to_string(),
        });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

#[async_trait]
impl ContentApi for HttpBackend {
    async fn random_card(
        &self,
        token: &AccessToken,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError> {
        self.get_learning(token, &LoadTarget::Random, params).await
    }

    async fn specific_card(
        &self,
        token: &AccessToken,
        card_id: &CardId,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError> {
        self.get_learning(token, &LoadTarget::Specific(card_id.clone()), params)
            .await
    }

    async fn deck_recommendations(
        &self,
        token: &AccessToken,
        limit: u32,
    ) -> Result<Vec<DeckRecommendation>, ApiError> {
        let url = self.recommendations_url(limit)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl AuthGateway for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError> {
        let url = self.endpoint(&["login"])?;
        let response = self.client.post(url).json(credentials).send().await?;
        read_json(response).await
    }
}
