//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

use storage::{SqliteInitError, StorageError};
use study_core::oauth::OAuthProvider;
use study_core::session::{LoadFailure, SessionError};

/// Failures talking to the backend, classified the way views report them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Transport-level failure, including timeouts.
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),
    /// Any non-success status other than 404, typically an expired token.
    #[error("request rejected with status {status}")]
    Auth { status: StatusCode, message: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("not signed in")]
    NotSignedIn,
    #[error("base url cannot carry a path: {0}")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Collapses the error into what the learning view shows.
    #[must_use]
    pub fn failure(&self) -> LoadFailure {
        match self {
            ApiError::Network(_) | ApiError::InvalidBaseUrl(_) => LoadFailure::Network,
            ApiError::Auth { .. } => LoadFailure::Auth,
            ApiError::NotFound => LoadFailure::NotFound,
            ApiError::InvalidResponse(_) => LoadFailure::InvalidResponse,
            ApiError::NotSignedIn => LoadFailure::SignedOut,
            ApiError::Storage(_) => LoadFailure::LocalStorage,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

/// Errors emitted by `LearningController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LearningError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("learning load failed: {0}")]
    Load(#[source] ApiError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{0} login is not configured")]
    OAuthNotConfigured(OAuthProvider),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl AuthError {
    /// Short message suitable for an inline login error.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            AuthError::Api(ApiError::Auth { message, status }) if message.is_empty() => {
                format!("server answered {status}")
            }
            AuthError::Api(ApiError::Auth { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base url {raw}: {source}")]
    BaseUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid timeout seconds: {0}")]
    Timeout(String),
    #[error("invalid default rank: {0}")]
    Rank(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_view_failures() {
        assert_eq!(ApiError::NotFound.failure(), LoadFailure::NotFound);
        assert_eq!(ApiError::NotSignedIn.failure(), LoadFailure::SignedOut);
        assert_eq!(
            ApiError::Auth {
                status: StatusCode::UNAUTHORIZED,
                message: String::new(),
            }
            .failure(),
            LoadFailure::Auth
        );
        assert_eq!(
            ApiError::InvalidResponse("x".into()).failure(),
            LoadFailure::InvalidResponse
        );
    }

    #[test]
    fn storage_read_failure_is_not_reported_as_signed_out() {
        let err = ApiError::Storage(StorageError::Connection("disk I/O error".into()));
        assert_eq!(err.failure(), LoadFailure::LocalStorage);
        assert_ne!(err.failure().message(), LoadFailure::SignedOut.message());
    }

    #[test]
    fn login_message_prefers_server_text() {
        let err = AuthError::Api(ApiError::Auth {
            status: StatusCode::UNAUTHORIZED,
            message: "bad password".into(),
        });
        assert_eq!(err.message(), "bad password");

        let err = AuthError::Api(ApiError::Auth {
            status: StatusCode::UNAUTHORIZED,
            message: String::new(),
        });
        assert_eq!(err.message(), "server answered 401 Unauthorized");
    }
}
