use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::{LearningController, LearningError};
use study_core::model::{CardId, FeedbackLabel};
use study_core::session::{ApplyOutcome, LearningParams, LearningState};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{LearningCardVm, LearningQuery, LearningScreen, feedback_class, map_learning_state};

#[component]
pub fn LearningView(query: LearningQuery) -> Element {
    match query.params() {
        Ok(params) => rsx! {
            LearningPage { params, query }
        },
        Err(err) => rsx! {
            div { class: "page",
                p { class: "error", "{err.message()}" }
            }
        },
    }
}

fn log_outcome(action: &str, result: Result<ApplyOutcome, LearningError>) {
    match result {
        Ok(ApplyOutcome::Applied) => {}
        Ok(ApplyOutcome::Superseded) => log::debug!("{action}: superseded by a newer load"),
        Err(err) => log::warn!("{action}: {err}"),
    }
}

/// Owns one controller for as long as the page stays mounted; route changes
/// reuse it so a late response for an old link is dropped.
#[component]
fn LearningPage(params: LearningParams, query: LearningQuery) -> Element {
    let ctx = use_context::<AppContext>();
    let card_id = query.target_card();
    let navigator = use_navigator();
    let controller: Arc<LearningController> = use_hook({
        let params = params.clone();
        move || ctx.learning(params)
    });
    let mut state = use_signal(|| LearningState::Loading);

    let _loader = use_resource({
        let controller = Arc::clone(&controller);
        use_reactive!(|(params, card_id)| {
            let controller = Arc::clone(&controller);
            async move {
                state.set(LearningState::Loading);
                let result = if controller.params() == params {
                    controller.start(card_id).await
                } else {
                    controller.change_params(params, card_id).await
                };
                log_outcome("load", result);
                state.set(controller.state());
            }
        })
    });

    let on_feedback = {
        let controller = Arc::clone(&controller);
        move |label: FeedbackLabel| {
            let controller = Arc::clone(&controller);
            state.set(LearningState::Loading);
            spawn(async move {
                log_outcome("feedback", controller.submit_feedback(label).await);
                state.set(controller.state());
            });
        }
    };

    let on_retry = {
        let controller = Arc::clone(&controller);
        move |_| {
            let controller = Arc::clone(&controller);
            state.set(LearningState::Loading);
            spawn(async move {
                log_outcome("retry", controller.retry().await);
                state.set(controller.state());
            });
        }
    };

    // A new cardId in the link reloads through the route; the same one is
    // loaded in place since the route would not change.
    let on_recommended = {
        let controller = Arc::clone(&controller);
        let query = query.clone();
        move |target: CardId| {
            if query.target_card().as_ref() == Some(&target) {
                let controller = Arc::clone(&controller);
                state.set(LearningState::Loading);
                spawn(async move {
                    log_outcome("recommended", controller.select_recommended(target).await);
                    state.set(controller.state());
                });
            } else {
                navigator.push(Route::Learning {
                    query: query.with_card(&target),
                });
            }
        }
    };

    let screen = map_learning_state(params.mode, &state.read());

    rsx! {
        match screen {
            LearningScreen::Loading => rsx! {
                div { class: "page loading", "Loading..." }
            },
            LearningScreen::Failed { message } => rsx! {
                div { class: "page",
                    p { class: "error", "{message}" }
                    button { class: "retry", onclick: on_retry, "Retry" }
                }
            },
            LearningScreen::Card(card) => rsx! {
                LearningCard { card, on_feedback, on_recommended }
            },
        }
    }
}

#[component]
fn LearningCard(
    card: LearningCardVm,
    on_feedback: EventHandler<FeedbackLabel>,
    on_recommended: EventHandler<CardId>,
) -> Element {
    rsx! {
        div { class: "page learning",
            div { class: "learning-main",
                header {
                    h2 { "{card.title}" }
                    p { class: "muted", "Remaining: {card.remaining}" }
                }
                div { class: "qa-box",
                    h4 { "Question" }
                    div { class: "question", "{card.question}" }
                }
                div { class: "qa-box",
                    h4 { "Answer" }
                    div { class: "answer", "{card.answer}" }
                }
                div { class: "feedback-bar",
                    for label in FeedbackLabel::ALL {
                        button {
                            key: "{label}",
                            class: feedback_class(label),
                            onclick: move |_| on_feedback.call(label),
                            "{label}"
                        }
                    }
                }
            }
            aside { class: "learning-side",
                h4 { "Recommended Cards" }
                for item in card.recommended {
                    div {
                        key: "{item.id}",
                        class: "recommended-card",
                        onclick: {
                            let id = item.id.clone();
                            move |_| on_recommended.call(id.clone())
                        },
                        p { "{item.question}" }
                    }
                }
            }
        }
    }
}
