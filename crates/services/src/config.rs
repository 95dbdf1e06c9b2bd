use std::env;
use std::time::Duration;

use study_core::model::RankName;
use study_core::oauth::{OAuthClient, OAuthProvider};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RANK: &str = "bronze";
pub const DEFAULT_KAKAO_REDIRECT: &str = "http://localhost:5173/oauth/kakao/callback";
pub const DEFAULT_NAVER_REDIRECT: &str = "http://localhost:5173/oauth/naver/callback";

/// Backend location and login settings.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
    /// Rank used when a deck recommendation opens the learning page.
    pub default_rank: RankName,
    pub oauth_clients: Vec<OAuthClient>,
}

impl ApiConfig {
    /// Read configuration from `STUDY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let raw_url = non_empty("STUDY_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let base_url = parse_base_url(&raw_url)?;

        let timeout = match non_empty("STUDY_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Timeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let rank = non_empty("STUDY_DEFAULT_RANK").unwrap_or_else(|| DEFAULT_RANK.into());
        let default_rank = RankName::new(rank.clone()).map_err(|_| ConfigError::Rank(rank))?;

        let mut oauth_clients = Vec::new();
        if let Some(client_id) = non_empty("STUDY_KAKAO_CLIENT_ID") {
            let redirect = non_empty("STUDY_KAKAO_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_KAKAO_REDIRECT.into());
            oauth_clients.push(OAuthClient::new(OAuthProvider::Kakao, client_id, redirect));
        }
        if let Some(client_id) = non_empty("STUDY_NAVER_CLIENT_ID") {
            let redirect = non_empty("STUDY_NAVER_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_NAVER_REDIRECT.into());
            oauth_clients.push(OAuthClient::new(OAuthProvider::Naver, client_id, redirect));
        }

        Ok(Self {
            base_url,
            timeout,
            default_rank,
            oauth_clients,
        })
    }

    /// Override the base URL (e.g. from `--api-url`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BaseUrl` if `raw` is not a valid URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    #[must_use]
    pub fn oauth_client(&self, provider: OAuthProvider) -> Option<&OAuthClient> {
        self.oauth_clients
            .iter()
            .find(|client| client.provider == provider)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::BaseUrl {
        raw: raw.to_string(),
        source,
    })
}
