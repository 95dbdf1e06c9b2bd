use std::sync::Arc;

use storage::Storage;
use study_core::model::RankName;
use study_core::session::LearningParams;

use crate::Clock;
use crate::api::{AuthGateway, ContentApi, HttpBackend};
use crate::auth_service::AuthService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::home_service::HomeService;
use crate::learning::{FeedbackSink, LearningController, StoredFeedbackSink};
use crate::session_context::SessionContext;

/// Assembles app-facing services around one backend and one client storage.
#[derive(Clone)]
pub struct AppServices {
    config: ApiConfig,
    clock: Clock,
    session: SessionContext,
    content: Arc<dyn ContentApi>,
    feedback: Arc<dyn FeedbackSink>,
    auth: Arc<AuthService>,
    home: Arc<HomeService>,
}

impl AppServices {
    /// Build services talking to the HTTP backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Http` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig, storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let backend = Arc::new(HttpBackend::new(&config)?);
        log::debug!("backend at {}", config.base_url);
        Ok(Self::with_backends(
            config,
            storage,
            clock,
            Arc::clone(&backend) as Arc<dyn ContentApi>,
            backend,
        ))
    }

    /// Build services against SQLite storage at `db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage or the HTTP client cannot be initialized.
    pub async fn new_sqlite(
        config: ApiConfig,
        db_url: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(config, &storage, clock)
    }

    /// Same wiring with injected backends.
    #[must_use]
    pub fn with_backends(
        config: ApiConfig,
        storage: &Storage,
        clock: Clock,
        content: Arc<dyn ContentApi>,
        gateway: Arc<dyn AuthGateway>,
    ) -> Self {
        let session = SessionContext::new(Arc::clone(&storage.client));
        let feedback: Arc<dyn FeedbackSink> =
            Arc::new(StoredFeedbackSink::new(Arc::clone(&storage.feedback)));
        let auth = Arc::new(AuthService::new(
            gateway,
            session.clone(),
            config.oauth_clients.clone(),
        ));
        let home = Arc::new(HomeService::new(Arc::clone(&content), session.clone()));

        Self {
            config,
            clock,
            session,
            content,
            feedback,
            auth,
            home,
        }
    }

    /// Fresh controller for one learning page.
    #[must_use]
    pub fn learning(&self, params: LearningParams) -> LearningController {
        LearningController::new(
            params,
            Arc::clone(&self.content),
            Arc::clone(&self.feedback),
            self.session.clone(),
            self.clock,
        )
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn home(&self) -> Arc<HomeService> {
        Arc::clone(&self.home)
    }

    #[must_use]
    pub fn session(&self) -> SessionContext {
        self.session.clone()
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn default_rank(&self) -> RankName {
        self.config.default_rank.clone()
    }
}
