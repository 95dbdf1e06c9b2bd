use std::sync::Arc;

use storage::{ClientStorage, StorageError};
use study_core::model::{ACCESS_TOKEN_KEY, AccessToken, AuthTokens, REFRESH_TOKEN_KEY};

use crate::error::ApiError;

/// Explicit holder of the signed-in state.
///
/// Owned by the application shell and handed to every service that builds
/// requests, so no request reads tokens from ambient state.
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn ClientStorage>,
}

impl SessionContext {
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    /// Stored token pair, if a non-empty access token is present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if client storage cannot be read.
    pub async fn tokens(&self) -> Result<Option<AuthTokens>, StorageError> {
        let Some(access) = self
            .storage
            .get_item(ACCESS_TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty())
        else {
            return Ok(None);
        };
        let refresh = self
            .storage
            .get_item(REFRESH_TOKEN_KEY)
            .await?
            .unwrap_or_default();
        Ok(Some(AuthTokens::new(access, refresh)))
    }

    /// Bearer token for the next request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotSignedIn` when no token is stored.
    pub async fn access_token(&self) -> Result<AccessToken, ApiError> {
        match self.storage.get_item(ACCESS_TOKEN_KEY).await? {
            Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
            _ => Err(ApiError::NotSignedIn),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if client storage cannot be read.
    pub async fn is_signed_in(&self) -> Result<bool, StorageError> {
        Ok(self.tokens().await?.is_some())
    }

    /// Persist both tokens.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either key cannot be written.
    pub async fn store(&self, tokens: &AuthTokens) -> Result<(), StorageError> {
        self.storage
            .set_item(ACCESS_TOKEN_KEY, &tokens.access_token)
            .await?;
        self.storage
            .set_item(REFRESH_TOKEN_KEY, &tokens.refresh_token)
            .await
    }

    /// Forget both tokens.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either key cannot be removed.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(ACCESS_TOKEN_KEY).await?;
        self.storage.remove_item(REFRESH_TOKEN_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;

    fn context() -> (SessionContext, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        (SessionContext::new(Arc::new(repo.clone())), repo)
    }

    #[tokio::test]
    async fn store_writes_both_keys() {
        let (ctx, repo) = context();
        ctx.store(&AuthTokens::new("a1", "r1")).await.unwrap();

        assert_eq!(
            repo.get_item(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
            Some("a1")
        );
        assert_eq!(
            repo.get_item(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("r1")
        );
        assert_eq!(ctx.access_token().await.unwrap().as_str(), "a1");
        assert!(ctx.is_signed_in().await.unwrap());
    }

    #[tokio::test]
    async fn missing_token_means_signed_out() {
        let (ctx, _repo) = context();
        assert!(matches!(
            ctx.access_token().await,
            Err(ApiError::NotSignedIn)
        ));
        assert!(!ctx.is_signed_in().await.unwrap());
    }

    #[tokio::test]
    async fn empty_token_means_signed_out() {
        let (ctx, repo) = context();
        repo.set_item(ACCESS_TOKEN_KEY, "").await.unwrap();

        assert_eq!(ctx.tokens().await.unwrap(), None);
        assert!(!ctx.is_signed_in().await.unwrap());
        assert!(matches!(
            ctx.access_token().await,
            Err(ApiError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn clear_removes_both_keys() {
        let (ctx, repo) = context();
        ctx.store(&AuthTokens::new("a1", "r1")).await.unwrap();
        ctx.clear().await.unwrap();

        assert_eq!(repo.get_item(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(repo.get_item(REFRESH_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(ctx.tokens().await.unwrap(), None);
    }
}
