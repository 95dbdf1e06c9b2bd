use std::sync::Arc;

use services::{AuthService, HomeService, LearningController};
use study_core::model::RankName;
use study_core::session::LearningParams;

/// What the views need from the application composition root.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn home(&self) -> Arc<HomeService>;
    fn learning(&self, params: LearningParams) -> LearningController;
    /// Rank used when a deck recommendation opens the learning page.
    fn default_rank(&self) -> RankName;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    auth: Arc<AuthService>,
    home: Arc<HomeService>,
    default_rank: RankName,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        let auth = app.auth();
        let home = app.home();
        let default_rank = app.default_rank();
        Self {
            app,
            auth,
            home,
            default_rank,
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn home(&self) -> Arc<HomeService> {
        Arc::clone(&self.home)
    }

    /// A new controller; each learning page owns exactly one.
    #[must_use]
    pub fn learning(&self, params: LearningParams) -> Arc<LearningController> {
        Arc::new(self.app.learning(params))
    }

    #[must_use]
    pub fn default_rank(&self) -> RankName {
        self.default_rank.clone()
    }
}

// Provided by the application composition root (`crates/app`).

#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
