use std::sync::Arc;

use study_core::model::Credentials;
use study_core::oauth::{OAuthClient, OAuthProvider};
use url::Url;

use crate::api::AuthGateway;
use crate::error::AuthError;
use crate::session_context::SessionContext;

/// Username/password login, logout, and OAuth redirects.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    session: SessionContext,
    oauth_clients: Vec<OAuthClient>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        session: SessionContext,
        oauth_clients: Vec<OAuthClient>,
    ) -> Self {
        Self {
            gateway,
            session,
            oauth_clients,
        }
    }

    /// Exchange credentials for a token pair and persist it.
    ///
    /// Nothing is stored when the gateway rejects the login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` when the gateway call fails, or
    /// `AuthError::Storage` if the tokens cannot be saved.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let tokens = match self.gateway.login(credentials).await {
            Ok(tokens) => tokens,
            Err(err) => {
                log::warn!("login rejected for {}: {err}", credentials.username);
                return Err(err.into());
            }
        };
        self.session.store(&tokens).await?;
        log::debug!("signed in as {}", credentials.username);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the tokens cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.clear().await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if client storage cannot be read.
    pub async fn is_signed_in(&self) -> Result<bool, AuthError> {
        Ok(self.session.is_signed_in().await?)
    }

    /// Providers with a configured client, in configuration order.
    #[must_use]
    pub fn oauth_providers(&self) -> Vec<OAuthProvider> {
        self.oauth_clients.iter().map(|client| client.provider).collect()
    }

    /// Authorization URL the login page opens for `provider`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::OAuthNotConfigured` when no client id is set.
    pub fn oauth_url(&self, provider: OAuthProvider) -> Result<Url, AuthError> {
        let client = self
            .oauth_clients
            .iter()
            .find(|client| client.provider == provider)
            .ok_or(AuthError::OAuthNotConfigured(provider))?;
        Ok(client.authorization_url()?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use storage::{ClientStorage, InMemoryRepository};
    use study_core::model::{ACCESS_TOKEN_KEY, AuthTokens, REFRESH_TOKEN_KEY};

    use super::*;
    use crate::error::ApiError;

    struct FakeGateway {
        accept: bool,
        seen: Mutex<Vec<Credentials>>,
    }

    #[async_trait]
    impl AuthGateway for FakeGateway {
        async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError> {
            self.seen.lock().unwrap().push(credentials.clone());
            if self.accept {
                Ok(AuthTokens::new("access-1", "refresh-1"))
            } else {
                Err(ApiError::Auth {
                    status: StatusCode::UNAUTHORIZED,
                    message: "bad credentials".into(),
                })
            }
        }
    }

    fn service(accept: bool) -> (AuthService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        let gateway = Arc::new(FakeGateway {
            accept,
            seen: Mutex::new(Vec::new()),
        });
        let clients = vec![OAuthClient::new(
            OAuthProvider::Naver,
            "naver-id",
            "http://localhost:5173/oauth/naver/callback",
        )];
        let service = AuthService::new(gateway, SessionContext::new(Arc::new(repo.clone())), clients);
        (service, repo)
    }

    #[tokio::test]
    async fn successful_login_stores_both_tokens() {
        let (auth, repo) = service(true);

        auth.login(&Credentials::new("kim", "pw")).await.unwrap();

        assert_eq!(
            repo.get_item(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
            Some("access-1")
        );
        assert_eq!(
            repo.get_item(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("refresh-1")
        );
        assert!(auth.is_signed_in().await.unwrap());
    }

    #[tokio::test]
    async fn rejected_login_keeps_storage_empty() {
        let (auth, repo) = service(false);

        let err = auth.login(&Credentials::new("kim", "nope")).await.unwrap_err();

        assert_eq!(err.message(), "bad credentials");
        assert_eq!(repo.get_item(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert!(!auth.is_signed_in().await.unwrap());
    }

    #[tokio::test]
    async fn logout_clears_tokens() {
        let (auth, _repo) = service(true);
        auth.login(&Credentials::new("kim", "pw")).await.unwrap();

        auth.logout().await.unwrap();

        assert!(!auth.is_signed_in().await.unwrap());
    }

    #[test]
    fn oauth_url_requires_configured_client() {
        let (auth, _repo) = service(true);

        let url = auth.oauth_url(OAuthProvider::Naver).unwrap();
        assert!(url.as_str().starts_with("https://nid.naver.com/oauth2.0/authorize?"));
        assert!(url.query_pairs().any(|(key, _)| key == "state"));

        assert!(matches!(
            auth.oauth_url(OAuthProvider::Kakao),
            Err(AuthError::OAuthNotConfigured(OAuthProvider::Kakao))
        ));
        assert_eq!(auth.oauth_providers(), vec![OAuthProvider::Naver]);
    }
}
