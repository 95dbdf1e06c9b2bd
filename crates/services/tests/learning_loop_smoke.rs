use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use services::{ApiConfig, ApiError, AppServices, AuthGateway, ContentApi, RECOMMENDATION_LIMIT};
use storage::{FeedbackLogRepository, Storage};
use study_core::model::{
    AccessToken, AuthTokens, Card, CardId, Credentials, DeckId, DeckRecommendation,
    FeedbackLabel, RankName, StudyMode,
};
use study_core::session::{ApplyOutcome, LearningBatch, LearningParams, LearningState};
use study_core::time::fixed_clock;

/// Serves a fixed deck of cards in order and logs every request.
#[derive(Default)]
struct ScriptedBackend {
    requests: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn batch_for(id: &str, remaining: u32) -> LearningBatch {
        let card = |id: &str| {
            Card::new(
                CardId::new(id).unwrap(),
                format!("question {id}"),
                format!("answer {id}"),
            )
        };
        LearningBatch::new(card(id), vec![card("c10"), card("c11")], remaining).unwrap()
    }
}

#[async_trait]
impl ContentApi for ScriptedBackend {
    async fn random_card(
        &self,
        token: &AccessToken,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(format!("random {} {} {}", token.as_str(), params.deck_id, params.mode));
        let remaining = 5 - u32::try_from(requests.len()).unwrap();
        Ok(Self::batch_for(&format!("r{}", requests.len()), remaining))
    }

    async fn specific_card(
        &self,
        token: &AccessToken,
        card_id: &CardId,
        params: &LearningParams,
    ) -> Result<LearningBatch, ApiError> {
        self.requests.lock().unwrap().push(format!(
            "specific {} {card_id} {}",
            token.as_str(),
            params.deck_id
        ));
        Ok(Self::batch_for(card_id.as_str(), 4))
    }

    async fn deck_recommendations(
        &self,
        _token: &AccessToken,
        limit: u32,
    ) -> Result<Vec<DeckRecommendation>, ApiError> {
        Ok((0..limit)
            .map(|n| DeckRecommendation {
                deck_id: DeckId::new(format!("d{n}")).unwrap(),
                deck_name: format!("Deck {n}"),
                reason: Some("due soon".into()),
            })
            .collect())
    }
}

#[async_trait]
impl AuthGateway for ScriptedBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError> {
        Ok(AuthTokens::new(format!("token-{}", credentials.username), "refresh"))
    }
}

#[tokio::test]
async fn login_then_study_records_feedback() {
    let storage = Storage::in_memory();
    let backend = Arc::new(ScriptedBackend::default());
    let config = ApiConfig::from_lookup(|_| None).unwrap();
    let services = AppServices::with_backends(
        config,
        &storage,
        fixed_clock(),
        Arc::clone(&backend) as Arc<dyn ContentApi>,
        Arc::clone(&backend) as Arc<dyn AuthGateway>,
    );

    services
        .auth()
        .login(&Credentials::new("kim", "pw"))
        .await
        .unwrap();
    let decks = services
        .home()
        .recommendations(RECOMMENDATION_LIMIT)
        .await
        .unwrap();
    assert_eq!(decks.len(), 3);

    let params = LearningParams::new(
        decks[0].deck_id.clone(),
        RankName::new("gold").unwrap(),
        StudyMode::ThreeDay,
    );
    let learning = services.learning(params);
    learning.start(None).await.unwrap();
    learning.submit_feedback(FeedbackLabel::Good).await.unwrap();
    let outcome = learning
        .select_recommended(CardId::new("c10").unwrap())
        .await
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Applied);

    let LearningState::Ready(batch) = learning.state() else {
        panic!("expected a ready state");
    };
    assert_eq!(batch.main_card().id.as_str(), "c10");
    assert_eq!(
        *backend.requests.lock().unwrap(),
        vec![
            "random token-kim d0 THREE_DAY".to_string(),
            "random token-kim d0 THREE_DAY".to_string(),
            "specific token-kim c10 d0".to_string(),
        ]
    );

    let logged = storage.feedback.recent_feedback(10).await.unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].event.label, FeedbackLabel::Good);
    assert_eq!(logged[0].event.card_id.as_str(), "r1");

    services.auth().logout().await.unwrap();
    assert!(learning.load(study_core::session::LoadTarget::Random).await.is_err());
    assert!(matches!(learning.state(), LearningState::Error(_)));
}
