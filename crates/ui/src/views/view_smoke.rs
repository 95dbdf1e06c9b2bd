use storage::ClientStorage;
use study_core::model::ACCESS_TOKEN_KEY;

use super::test_harness::{FakeBackend, ViewKind, sample_decks, setup_view_harness};
use crate::vm::LearningQuery;

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_recommendations() {
    let backend = FakeBackend {
        decks: sample_decks(),
        ..FakeBackend::default()
    };
    let mut harness = setup_view_harness(ViewKind::Home, backend, true).await;

    harness.rebuild();
    let html = harness.render_until("Irregular Verbs").await;

    assert!(html.contains("Irregular Verbs"), "missing deck in {html}");
    assert!(html.contains("Not reviewed for 3 days"), "missing reason in {html}");
    assert!(html.contains("3 Day Project"), "missing mode tile in {html}");
    assert!(html.contains("Permanent Project"), "missing mode tile in {html}");
    assert!(html.contains("Logout"), "missing logout in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_signed_out_shows_empty_list() {
    let backend = FakeBackend {
        decks: sample_decks(),
        ..FakeBackend::default()
    };
    let mut harness = setup_view_harness(ViewKind::Home, backend, false).await;

    harness.rebuild();
    let html = harness.render_until("No recommendations yet.").await;

    assert!(html.contains("No recommendations yet."), "expected empty list in {html}");
    assert!(!html.contains("Irregular Verbs"));
    assert!(html.contains("Log in"), "missing login action in {html}");
    assert!(!html.contains("Logout"), "signed-out home offers logout: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form_and_oauth_link() {
    let mut harness = setup_view_harness(ViewKind::Login, FakeBackend::default(), false).await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("name=\"username\""), "missing username in {html}");
    assert!(html.contains("type=\"password\""), "missing password in {html}");
    assert!(
        html.contains("https://kauth.kakao.com/oauth/authorize?client_id=kakao-id"),
        "missing kakao link in {html}"
    );
    assert!(html.contains("Log in with Kakao"));
    assert!(!html.contains("Log in with Naver"));
    assert_eq!(
        harness.storage.client.get_item(ACCESS_TOKEN_KEY).await.unwrap(),
        None
    );
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_smoke_renders_random_card() {
    let query = LearningQuery::from("deckId=d1&rankName=gold&mode=THREE_DAY");
    let mut harness =
        setup_view_harness(ViewKind::Learning(query), FakeBackend::default(), true).await;

    harness.rebuild();
    let html = harness.render_until("question c9").await;

    assert!(html.contains("question c9"), "missing question in {html}");
    assert!(html.contains("answer c9"), "missing answer in {html}");
    assert!(html.contains("Remaining: 5"), "missing remaining in {html}");
    assert!(html.contains("recommended question"), "missing recommendation in {html}");
    for label in ["Again", "Hard", "Good", "Easy"] {
        assert!(html.contains(label), "missing {label} button in {html}");
    }
    assert_eq!(
        *harness.backend.requests.lock().unwrap(),
        vec!["random d1".to_string()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_smoke_deep_link_loads_specific_card() {
    let query = LearningQuery::from("deckId=d1&rankName=gold&cardId=c4");
    let mut harness =
        setup_view_harness(ViewKind::Learning(query), FakeBackend::default(), true).await;

    harness.rebuild();
    let html = harness.render_until("question c4").await;

    assert!(html.contains("question c4"), "missing question in {html}");
    assert_eq!(
        *harness.backend.requests.lock().unwrap(),
        vec!["specific c4".to_string()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_smoke_failure_offers_retry() {
    let backend = FakeBackend {
        fail_learning: true,
        ..FakeBackend::default()
    };
    let query = LearningQuery::from("deckId=d1&rankName=gold");
    let mut harness = setup_view_harness(ViewKind::Learning(query), backend, true).await;

    harness.rebuild();
    let html = harness.render_until("Retry").await;

    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(!html.contains("question"), "stale card rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_smoke_rejects_link_without_deck() {
    let query = LearningQuery::from("rankName=gold");
    let mut harness =
        setup_view_harness(ViewKind::Learning(query), FakeBackend::default(), true).await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("missing a deck or rank"), "missing error in {html}");
    assert!(harness.backend.requests.lock().unwrap().is_empty());
}
