use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    ApiConfig, ApiError, AppServices, AuthGateway, AuthService, ContentApi, HomeService,
    LearningController,
};
use storage::{ClientStorage, Storage};
use study_core::model::{
    ACCESS_TOKEN_KEY, AccessToken, AuthTokens, Card, CardId, Credentials, DeckId,
    DeckRecommendation, RankName,
};
use study_core::session::{LearningBatch, LearningParams};
use study_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, LearningView, LoginView};
use crate::vm::LearningQuery;

/// Backend double: every learning call returns the same card; recommendations
/// and logins come from the configured fields.
#[derive(Default)]
pub struct FakeBackend {
    pub decks: Vec<DeckRecommendation>,
    pub fail_learning: bool,
    pub requests: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn batch(id: &str) -> LearningBatch {
        LearningBatch::new(
            Card::new(CardId::new(id).unwrap(), format!("question {id}"), format!("answer {id}")),
            vec![Card::new(CardId::new("c10").unwrap(), "recommended question", "")],
            5,
        )
        .unwrap()
    }
}

#[async_trait]
impl ContentApi for FakeBackend {
    async fn random_card(
        &self,
        _token: &AccessToken,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("random {}", params.deck_id));
        if self.fail_learning {
            return Err(ApiError::NotFound);
        }
        Ok(Self::batch("c9"))
    }

    async fn specific_card(
        &self,
        _token: &AccessToken,
        card_id: &CardId,
        _params: &LearningParams,
    ) -> Result<LearningBatch, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("specific {card_id}"));
        if self.fail_learning {
            return Err(ApiError::NotFound);
        }
        Ok(Self::batch(card_id.as_str()))
    }

    async fn deck_recommendations(
        &self,
        _token: &AccessToken,
        _limit: u32,
    ) -> Result<Vec<DeckRecommendation>, ApiError> {
        Ok(self.decks.clone())
    }
}

#[async_trait]
impl AuthGateway for FakeBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthTokens, ApiError> {
        Ok(AuthTokens::new("token", "refresh"))
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn home(&self) -> Arc<HomeService> {
        self.services.home()
    }

    fn learning(&self, params: LearningParams) -> LearningController {
        self.services.learning(params)
    }

    fn default_rank(&self) -> RankName {
        self.services.default_rank()
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Home,
    Login,
    Learning(LearningQuery),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Learning(query) => rsx! { LearningView { query } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub backend: Arc<FakeBackend>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drives pending work until the rendered html contains `needle`.
    pub async fn render_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_decks() -> Vec<DeckRecommendation> {
    vec![DeckRecommendation {
        deck_id: DeckId::new("7").unwrap(),
        deck_name: "Irregular Verbs".into(),
        reason: Some("Not reviewed for 3 days".into()),
    }]
}

pub async fn setup_view_harness(view: ViewKind, backend: FakeBackend, signed_in: bool) -> ViewHarness {
    let storage = Storage::in_memory();
    if signed_in {
        storage
            .client
            .set_item(ACCESS_TOKEN_KEY, "token")
            .await
            .expect("store token");
    }

    let backend = Arc::new(backend);
    let config = ApiConfig::from_lookup(|key| {
        (key == "STUDY_KAKAO_CLIENT_ID").then(|| "kakao-id".to_string())
    })
    .expect("config");
    let services = AppServices::with_backends(
        config,
        &storage,
        fixed_clock(),
        Arc::clone(&backend) as Arc<dyn ContentApi>,
        Arc::clone(&backend) as Arc<dyn AuthGateway>,
    );

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );

    ViewHarness {
        dom,
        storage,
        backend,
    }
}
