use std::fmt;

use url::Url;
use uuid::Uuid;

/// Third-party login providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    Kakao,
    Naver,
}

impl OAuthProvider {
    #[must_use]
    pub fn authorize_endpoint(self) -> &'static str {
        match self {
            OAuthProvider::Kakao => "https://kauth.kakao.com/oauth/authorize",
            OAuthProvider::Naver => "https://nid.naver.com/oauth2.0/authorize",
        }
    }

    /// Naver rejects authorization requests without a `state` value.
    #[must_use]
    pub fn requires_state(self) -> bool {
        matches!(self, OAuthProvider::Naver)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OAuthProvider::Kakao => "Kakao",
            OAuthProvider::Naver => "Naver",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A registered OAuth client for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClient {
    pub provider: OAuthProvider,
    pub client_id: String,
    pub redirect_uri: String,
}

impl OAuthClient {
    #[must_use]
    pub fn new(
        provider: OAuthProvider,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Authorization URL with a fresh random `state` where the provider needs one.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the provider endpoint cannot be parsed.
    pub fn authorization_url(&self) -> Result<Url, url::ParseError> {
        let state = Uuid::new_v4().simple().to_string();
        self.authorization_url_with_state(&state)
    }

    /// Authorization URL using the given `state`. The code exchange happens on
    /// the redirect URI and is not handled here.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the provider endpoint cannot be parsed.
    pub fn authorization_url_with_state(&self, state: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(self.provider.authorize_endpoint())?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri)
                .append_pair("response_type", "code");
            if self.provider.requires_state() {
                query.append_pair("state", state);
            }
        }
        Ok(url)
    }
}
